
#[cfg(feature = "collisions")]
mod test_utils;

#[cfg(all(feature = "allow_filesystem", feature = "collisions"))]
mod test_from_yaml;
