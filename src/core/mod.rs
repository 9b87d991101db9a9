pub mod body;
pub mod collision;
pub mod debounce;
pub mod math;
pub mod toi;
