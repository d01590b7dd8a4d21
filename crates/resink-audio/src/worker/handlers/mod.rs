mod arm;
mod shutdown;
mod tick;
