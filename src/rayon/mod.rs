pub mod map;
mod multimap;
pub mod set;

#[cfg(test)]
mod tests;
