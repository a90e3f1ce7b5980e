pub mod export;
pub mod load;
