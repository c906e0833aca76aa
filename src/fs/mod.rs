pub mod opener;
pub mod tree;
