/// Renders `data` as a lower-case hexadecimal string.
///
/// With `reverse` set the bytes are printed from the last to the first, which
/// matches the little-endian notation some GOST test material uses. This is a
/// formatting aid only; never pass key or IV bytes to it for logging.
pub fn hexstr(data: &[u8], reverse: bool) -> String {
    if reverse {
        let rev = data.iter().rev().copied().collect::<Vec<_>>();
        hex::encode(rev)
    } else {
        hex::encode(data)
    }
}
