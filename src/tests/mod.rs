mod persistence;
mod set_ops;
mod traits;
