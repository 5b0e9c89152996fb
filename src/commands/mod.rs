pub mod porcelain;
