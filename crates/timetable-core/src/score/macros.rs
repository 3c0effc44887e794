//! Declarative macros generating the field-wise boilerplate of score types.

/// Generates `PartialOrd`, `Add`, `Sub`, `Neg`, and `Sum` for a field-based score.
///
/// Fields are passed to the constructor in the order listed.
///
/// ```ignore
/// impl_score_ops!(HardSoftScore { hard, soft } => of);
/// ```
macro_rules! impl_score_ops {
    ($type:ident { $($field:ident),+ } => $ctor:ident) => {
        impl PartialOrd for $type {
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl std::ops::Add for $type {
            type Output = Self;

            fn add(self, rhs: Self) -> Self {
                $type::$ctor($(self.$field + rhs.$field),+)
            }
        }

        impl std::ops::AddAssign for $type {
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }

        impl std::ops::Sub for $type {
            type Output = Self;

            fn sub(self, rhs: Self) -> Self {
                $type::$ctor($(self.$field - rhs.$field),+)
            }
        }

        impl std::ops::SubAssign for $type {
            fn sub_assign(&mut self, rhs: Self) {
                *self = *self - rhs;
            }
        }

        impl std::ops::Neg for $type {
            type Output = Self;

            fn neg(self) -> Self {
                $type::$ctor($(-self.$field),+)
            }
        }

        impl std::iter::Sum for $type {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.fold($type::ZERO, |acc, s| acc + s)
            }
        }
    };
}

/// Generates `ParseableScore` for the slash-separated `"Xhard/Ysoft"` form.
macro_rules! impl_score_parse {
    ($type:ident { $($field:ident => $suffix:literal),+ } => $ctor:ident) => {
        impl $crate::score::traits::ParseableScore for $type {
            fn parse(s: &str) -> Result<Self, $crate::score::traits::ScoreParseError> {
                let trimmed = s.trim();
                let mut parts = trimmed.split('/');
                $(
                    let $field = {
                        let part = parts.next().map(str::trim).ok_or_else(|| {
                            $crate::score::traits::ScoreParseError {
                                message: format!(
                                    "'{}' is missing the {} level",
                                    trimmed, $suffix
                                ),
                            }
                        })?;
                        let digits = part.strip_suffix($suffix).ok_or_else(|| {
                            $crate::score::traits::ScoreParseError {
                                message: format!("'{}' must end with '{}'", part, $suffix),
                            }
                        })?;
                        digits.parse::<i64>().map_err(|e| {
                            $crate::score::traits::ScoreParseError {
                                message: format!("invalid {} value '{}': {}", $suffix, digits, e),
                            }
                        })?
                    };
                )+
                if parts.next().is_some() {
                    return Err($crate::score::traits::ScoreParseError {
                        message: format!(
                            "'{}' has more levels than {} expects",
                            trimmed,
                            stringify!($type)
                        ),
                    });
                }
                Ok($type::$ctor($($field),+))
            }
        }
    };
}
