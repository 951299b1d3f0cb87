pub mod handlers;
pub mod routes;
pub mod services;

#[cfg(test)]
pub mod test_support;
