pub mod sukuna;
