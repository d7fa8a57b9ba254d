#![cfg_attr(not(test), no_std)]

/// Writer trait for resource constrained systems.
pub trait NanoWrite {
    /// Write a byte to the writer.
    fn write_byte(&mut self, b: u8);

    /// Write all bytes of `s` to the writer.
    fn write_bytes(&mut self, s: &[u8]) {
        for &b in s {
            self.write_byte(b);
        }
    }
}

/// Display trait for resource constrained systems.
pub trait NanoDisplay {
    /// Write formatted representation of `self` to `f`.
    fn fmt<F: NanoWrite>(self, f: &mut F);
}

/// Implement NanoDisplay for an unsigned type.
macro_rules! display_unsigned {
    ($ty:ident) => {
        impl $crate::NanoDisplay for $ty {
            fn fmt<F: $crate::NanoWrite>(mut self, f: &mut F) {
                const MAX_POW10: $ty = <$ty>::pow(10, $ty::MAX.ilog10() as u32);

                let mut div = MAX_POW10;
                let mut print = false;

                while div > 0 {
                    let dig = (self / div) as u8;
                    self %= div;
                    div /= 10;

                    if !print && dig > 0 {
                        print = true;
                    }

                    if print || (div == 0) {
                        let b = 0x30 + dig;
                        f.write_byte(b);
                    }
                }
            }
        }
    };
}

display_unsigned!(u8);
display_unsigned!(u16);
display_unsigned!(u32);

impl NanoDisplay for &str {
    fn fmt<F: NanoWrite>(self, f: &mut F) {
        f.write_bytes(self.as_bytes());
    }
}

impl NanoDisplay for bool {
    fn fmt<F: NanoWrite>(self, f: &mut F) {
        f.write_byte(if self { b'1' } else { b'0' });
    }
}

/// Zero-padded hexadecimal output, two digits per byte.
///
/// Register dumps read better with a fixed width than with the decimal
/// formatting of the plain integer impls.
#[derive(Clone, Copy)]
pub struct Hex<T>(pub T);

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

macro_rules! display_hex {
    ($ty:ident) => {
        impl $crate::NanoDisplay for Hex<$ty> {
            fn fmt<F: $crate::NanoWrite>(self, f: &mut F) {
                let mut shift = <$ty>::BITS;
                while shift > 0 {
                    shift -= 4;
                    let nibble = ((self.0 >> shift) & 0xF) as usize;
                    f.write_byte(HEX_DIGITS[nibble]);
                }
            }
        }
    };
}

display_hex!(u8);
display_hex!(u16);
