pub mod instrument;
