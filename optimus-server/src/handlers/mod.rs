pub mod assets;
pub mod contact;
pub mod gallery;
pub mod health;
