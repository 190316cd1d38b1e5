use anyhow::{Result, bail};
use std::{fmt::Debug, ops::RangeBounds};

pub fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }

    Ok(())
}

pub fn check_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        bail!("name must not be blank");
    }

    Ok(())
}
