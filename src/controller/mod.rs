//! Controllers turn a [`crate::http::HttpRequest`] into a
//! [`crate::http::HttpResponse`].

mod signup;

pub use signup::*;
