pub mod catalog;
pub mod create;
pub mod gallery;
pub mod share;
