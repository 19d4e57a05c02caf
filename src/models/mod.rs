mod request;

pub use request::StreamRequest;
