// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

/// Declares a static flag schema from a list of code to attribute pairs. For example,
/// `0x00 => Ground` maps the byte `0x00` to `Attribute::Ground`.
///
/// Duplicate codes are rejected at compile time.
#[macro_export]
macro_rules! define_flag_schema {
    (
        $(#[$meta:meta])*
        $vis:vis static $name:ident: $revision:ident {
            $($code:literal => $attribute:ident),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis static $name: $crate::schema::FlagSchema = $crate::schema::FlagSchema::new(
            $crate::schema::FormatRevision::$revision,
            &[
                $(($code, $crate::schema::Attribute::$attribute),)+
            ],
        );
    };
}
