mod dispatch;
mod gateway;
mod helpers;
mod transport;
