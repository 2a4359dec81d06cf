//! Property tests against the public `Tree` API.

mod dot;
mod tree;
