pub mod engine;
pub mod queue;
pub mod sim;

#[cfg(test)]
mod test;
