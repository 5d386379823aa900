mod fakes;
mod notify;
mod projection;
mod router;
