/// Returns the greatest common divisor of `a` and `b`.
pub fn gcd(mut a: u8, mut b: u8) -> u8 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
