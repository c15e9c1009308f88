/// A source that returns `values` in order, then repeats them.
pub fn scripted(values: &[u32]) -> impl FnMut() -> u32 + use<> {
    let values = values.to_vec();
    let mut next = 0;
    move || {
        let value = values[next % values.len()];
        next += 1;
        value
    }
}

/// A source that fails the test if the cache ever asks it for a number.
pub fn forbidden() -> impl FnMut() -> u32 {
    || -> u32 { panic!("random source consulted while an invalid line was available") }
}
