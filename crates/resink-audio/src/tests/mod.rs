
mod lifecycle;
