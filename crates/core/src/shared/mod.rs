pub mod side_effect;
#[cfg(test)]
pub mod test_utils;
pub mod usecase;
