mod level;
mod observer;
mod state;
mod worker;
