pub mod home;
pub mod people;
