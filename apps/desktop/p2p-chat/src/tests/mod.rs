mod alert;
mod commands;
mod logger;
mod render;
mod session;
