#[cfg(test)]
pub mod test_utils;

#[inline]
pub(crate) const fn cdiv(a: usize, b: usize) -> usize {
    (a + b - 1) / b
}

#[allow(clippy::uninit_vec)]
#[inline]
pub(crate) fn get_tmp_bucket<T>(len: usize) -> Vec<T> {
    let mut tmp_bucket = Vec::with_capacity(len);
    unsafe {
        // Safety: This will leave the vec with potentially uninitialized data
        // however as we account for every value when placing things
        // into tmp_bucket, this is "safe". This is used because it provides a
        // very significant speed improvement over resize, to_vec etc.
        tmp_bucket.set_len(len);
    }

    tmp_bucket
}
