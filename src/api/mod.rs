pub mod fba;
