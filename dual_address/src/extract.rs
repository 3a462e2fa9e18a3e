//! Views derived from a resolved [`CrossAccountId`].
//!
//! Every operation accepts anything implementing [`IntoAccountInput`] and has
//! a `*_safe` twin that returns [`None`] where the original returns an error.

use dual_address_common::DEFAULT_SS58_FORMAT;

use crate::{
    cross_account::{
        self, AccountInput, CrossAccountId, CrossAccountIdUncapitalized, EnhancedCrossAccountId,
        EthCrossAccountId, IntoAccountInput,
    },
    error::AddressError,
    ethereum, mirror, ss58,
};

/// Generates the `Option` returning twin of a fallible extractor.
macro_rules! impl_safe_variant {
    ($(#[$doc:meta])* $safe:ident => $fallible:ident($($arg:ident: $arg_ty:ty),*) -> $ret:ty) => {
        $(#[$doc])*
        pub fn $safe<'a>(input: impl IntoAccountInput<'a>, $($arg: $arg_ty),*) -> Option<$ret> {
            $fallible(input, $($arg),*).ok()
        }
    };
}

/// The single address of `input`, as given.
pub fn address<'a>(input: impl IntoAccountInput<'a>) -> Result<String, AddressError> {
    cross_account::resolve(input, false).map(into_address)
}

/// The single address of `input`, normalised.
pub fn address_normalized<'a>(input: impl IntoAccountInput<'a>) -> Result<String, AddressError> {
    cross_account::resolve(input, true).map(into_address)
}

/// The identity of `input`, as given.
pub fn cross_account_id<'a>(
    input: impl IntoAccountInput<'a>,
) -> Result<CrossAccountId, AddressError> {
    cross_account::resolve(input, false)
}

/// The identity of `input`, normalised.
pub fn cross_account_id_normalized<'a>(
    input: impl IntoAccountInput<'a>,
) -> Result<CrossAccountId, AddressError> {
    cross_account::resolve(input, true)
}

/// The identity of `input` with lower-case keys.
pub fn cross_account_id_uncapitalized<'a>(
    input: impl IntoAccountInput<'a>,
) -> Result<CrossAccountIdUncapitalized, AddressError> {
    cross_account::resolve(input, false).map(|id| id.uncapitalized())
}

/// The Substrate address of `input`, or the Substrate mirror (network 42) of
/// its Ethereum address.
pub fn substrate_or_mirror_if_ethereum<'a>(
    input: impl IntoAccountInput<'a>,
) -> Result<String, AddressError> {
    substrate_or_mirror(cross_account::resolve(input, false)?)
}

/// [`substrate_or_mirror_if_ethereum`] with the Substrate address normalised.
pub fn substrate_or_mirror_if_ethereum_normalized<'a>(
    input: impl IntoAccountInput<'a>,
) -> Result<String, AddressError> {
    substrate_or_mirror(cross_account::resolve(input, true)?)
}

/// The identity of `input` with its canonical forms; `address_ss58` is
/// rendered under `ss58_format`.
pub fn enhanced_cross_account_id<'a>(
    input: impl IntoAccountInput<'a>,
    ss58_format: u16,
) -> Result<EnhancedCrossAccountId, AddressError> {
    cross_account::enhance(cross_account::resolve(input, false)?, ss58_format)
}

/// The `{eth, sub}` pair of `input`.
pub fn eth_cross_account_id<'a>(
    input: impl IntoAccountInput<'a>,
) -> Result<EthCrossAccountId, AddressError> {
    cross_account::to_eth_cross_account_id(&cross_account::resolve(input, false)?)
}

/// The key an indexer files `input` under: the Substrate address under
/// network 42, or the lower-cased Ethereum address.
pub fn address_for_scan_normalized<'a>(
    input: impl IntoAccountInput<'a>,
) -> Result<String, AddressError> {
    Ok(match cross_account::resolve(input, true)? {
        CrossAccountId::Substrate(address) => address,
        CrossAccountId::Ethereum(address) => address.to_ascii_lowercase(),
    })
}

impl_safe_variant!(
    /// See [`address`].
    address_safe => address() -> String
);
impl_safe_variant!(
    /// See [`address_normalized`].
    address_normalized_safe => address_normalized() -> String
);
impl_safe_variant!(
    /// See [`cross_account_id`].
    cross_account_id_safe => cross_account_id() -> CrossAccountId
);
impl_safe_variant!(
    /// See [`cross_account_id_normalized`].
    cross_account_id_normalized_safe => cross_account_id_normalized() -> CrossAccountId
);
impl_safe_variant!(
    /// See [`cross_account_id_uncapitalized`].
    cross_account_id_uncapitalized_safe => cross_account_id_uncapitalized()
        -> CrossAccountIdUncapitalized
);
impl_safe_variant!(
    /// See [`substrate_or_mirror_if_ethereum`].
    substrate_or_mirror_if_ethereum_safe => substrate_or_mirror_if_ethereum() -> String
);
impl_safe_variant!(
    /// See [`substrate_or_mirror_if_ethereum_normalized`].
    substrate_or_mirror_if_ethereum_normalized_safe =>
        substrate_or_mirror_if_ethereum_normalized() -> String
);
impl_safe_variant!(
    /// See [`enhanced_cross_account_id`].
    enhanced_cross_account_id_safe => enhanced_cross_account_id(ss58_format: u16)
        -> EnhancedCrossAccountId
);
impl_safe_variant!(
    /// See [`eth_cross_account_id`].
    eth_cross_account_id_safe => eth_cross_account_id() -> EthCrossAccountId
);
impl_safe_variant!(
    /// See [`address_for_scan_normalized`].
    address_for_scan_normalized_safe => address_for_scan_normalized() -> String
);

/// `true` iff both inputs are Substrate shaped and carry the same public key.
/// Never fails.
pub fn compare_substrate<'a, 'b>(
    a: impl IntoAccountInput<'a>,
    b: impl IntoAccountInput<'b>,
) -> bool {
    match (substrate_text(a), substrate_text(b)) {
        (Some(a), Some(b)) => ss58::compare(a, b),
        _ => false,
    }
}

/// `true` iff both inputs are Ethereum shaped and equal up to casing. Never
/// fails.
pub fn compare_ethereum<'a, 'b>(
    a: impl IntoAccountInput<'a>,
    b: impl IntoAccountInput<'b>,
) -> bool {
    match (ethereum_text(a), ethereum_text(b)) {
        (Some(a), Some(b)) => ethereum::compare(a, b),
        _ => false,
    }
}

fn substrate_text<'a>(input: impl IntoAccountInput<'a>) -> Option<&'a str> {
    match input.into_account_input().ok()? {
        AccountInput::Address(address) | AccountInput::Substrate(address) => Some(address),
        _ => None,
    }
}

fn ethereum_text<'a>(input: impl IntoAccountInput<'a>) -> Option<&'a str> {
    match input.into_account_input().ok()? {
        AccountInput::Address(address) | AccountInput::Ethereum(address) => Some(address),
        _ => None,
    }
}

fn into_address(id: CrossAccountId) -> String {
    match id {
        CrossAccountId::Substrate(address) | CrossAccountId::Ethereum(address) => address,
    }
}

fn substrate_or_mirror(id: CrossAccountId) -> Result<String, AddressError> {
    match id {
        CrossAccountId::Substrate(address) => Ok(address),
        CrossAccountId::Ethereum(address) => {
            mirror::ethereum_to_substrate(&address, DEFAULT_SS58_FORMAT)
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::{
        cross_account::AddressType,
        testing_utils::{
            common_setup, ETH_ADDRESS, ETH_ADDRESS_LOWERCASE, ETH_ADDRESS_MANGLED, OPAL,
            OPAL_MANGLED, QUARTZ, QUARTZ_MANGLED, SUB_MIRROR_OF_ETH_ADDRESS, UNIQUE,
        },
    };

    fn substrate_shapes(address: &str) -> [Value; 3] {
        [
            json!(address),
            json!({ "Substrate": address }),
            json!({ "substrate": address }),
        ]
    }

    fn ethereum_shapes(address: &str) -> [Value; 3] {
        [
            json!(address),
            json!({ "Ethereum": address }),
            json!({ "ethereum": address }),
        ]
    }

    #[test]
    fn address_substrate() -> Result<(), AddressError> {
        common_setup();

        for shape in substrate_shapes(QUARTZ) {
            assert_eq!(address(&shape)?, QUARTZ);
            assert_eq!(address_normalized(&shape)?, OPAL);
            assert_eq!(address_safe(&shape).as_deref(), Some(QUARTZ));
            assert_eq!(address_normalized_safe(&shape).as_deref(), Some(OPAL));
        }

        for shape in substrate_shapes(OPAL) {
            assert_eq!(address_normalized(&shape)?, OPAL);
            assert_eq!(address_normalized_safe(&shape).as_deref(), Some(OPAL));
        }

        Ok(())
    }

    #[test]
    fn address_ethereum() -> Result<(), AddressError> {
        for shape in ethereum_shapes(ETH_ADDRESS) {
            assert_eq!(address(&shape)?, ETH_ADDRESS);
            assert_eq!(address_safe(&shape).as_deref(), Some(ETH_ADDRESS));
        }

        for shape in ethereum_shapes(ETH_ADDRESS_LOWERCASE) {
            assert_eq!(address(&shape)?, ETH_ADDRESS_LOWERCASE);
            assert_eq!(address_normalized(&shape)?, ETH_ADDRESS);
            assert_eq!(address_normalized_safe(&shape).as_deref(), Some(ETH_ADDRESS));
        }

        Ok(())
    }

    #[test]
    fn cross_account_ids() -> Result<(), AddressError> {
        let quartz = CrossAccountId::Substrate(QUARTZ.to_owned());
        let opal = CrossAccountId::Substrate(OPAL.to_owned());

        for shape in substrate_shapes(QUARTZ) {
            assert_eq!(cross_account_id(&shape)?, quartz);
            assert_eq!(cross_account_id_safe(&shape), Some(quartz.clone()));
            assert_eq!(cross_account_id_normalized(&shape)?, opal);
            assert_eq!(cross_account_id_normalized_safe(&shape), Some(opal.clone()));
        }

        let lower = CrossAccountId::Ethereum(ETH_ADDRESS_LOWERCASE.to_owned());
        let checksummed = CrossAccountId::Ethereum(ETH_ADDRESS.to_owned());

        for shape in ethereum_shapes(ETH_ADDRESS_LOWERCASE) {
            assert_eq!(cross_account_id(&shape)?, lower);
            assert_eq!(cross_account_id_safe(&shape), Some(lower.clone()));
            assert_eq!(cross_account_id_normalized(&shape)?, checksummed);
            assert_eq!(
                cross_account_id_normalized_safe(&shape),
                Some(checksummed.clone())
            );
        }

        assert_eq!(
            cross_account_id_uncapitalized(QUARTZ)?,
            CrossAccountIdUncapitalized::Substrate(QUARTZ.to_owned())
        );
        assert_eq!(
            cross_account_id_uncapitalized_safe(&json!({ "Ethereum": ETH_ADDRESS })),
            Some(CrossAccountIdUncapitalized::Ethereum(ETH_ADDRESS.to_owned()))
        );

        Ok(())
    }

    #[test]
    fn substrate_or_mirror() -> Result<(), AddressError> {
        assert_eq!(substrate_or_mirror_if_ethereum(QUARTZ)?, QUARTZ);
        assert_eq!(
            substrate_or_mirror_if_ethereum(ETH_ADDRESS)?,
            SUB_MIRROR_OF_ETH_ADDRESS
        );
        assert_eq!(substrate_or_mirror_if_ethereum_normalized(QUARTZ)?, OPAL);
        assert_eq!(
            substrate_or_mirror_if_ethereum_normalized(ETH_ADDRESS)?,
            SUB_MIRROR_OF_ETH_ADDRESS
        );

        assert_eq!(
            substrate_or_mirror_if_ethereum_safe(QUARTZ).as_deref(),
            Some(QUARTZ)
        );
        assert_eq!(
            substrate_or_mirror_if_ethereum_safe(ETH_ADDRESS).as_deref(),
            Some(SUB_MIRROR_OF_ETH_ADDRESS)
        );
        assert_eq!(
            substrate_or_mirror_if_ethereum_normalized_safe(QUARTZ).as_deref(),
            Some(OPAL)
        );
        assert_eq!(
            substrate_or_mirror_if_ethereum_normalized_safe(ETH_ADDRESS).as_deref(),
            Some(SUB_MIRROR_OF_ETH_ADDRESS)
        );
        assert_eq!(substrate_or_mirror_if_ethereum_safe(QUARTZ_MANGLED), None);

        Ok(())
    }

    #[test]
    fn enhanced_ids() -> Result<(), AddressError> {
        let enhanced = enhanced_cross_account_id(&json!({ "substrate": QUARTZ }), 7391)?;
        assert_eq!(
            enhanced.cross_account_id,
            CrossAccountId::Substrate(QUARTZ.to_owned())
        );
        assert_eq!(enhanced.address, OPAL);
        assert_eq!(enhanced.address_ss58, UNIQUE);
        assert_eq!(enhanced.address_type, AddressType::Substrate);

        let enhanced = enhanced_cross_account_id(ETH_ADDRESS_LOWERCASE, 42)?;
        assert_eq!(enhanced.address, ETH_ADDRESS);
        assert!(enhanced.is_ethereum);

        assert_eq!(enhanced_cross_account_id_safe(OPAL_MANGLED, 42), None);
        assert_eq!(enhanced_cross_account_id_safe(OPAL, 46), None);

        Ok(())
    }

    #[test]
    fn eth_cross_account_ids_reproduce_the_identity() -> Result<(), AddressError> {
        for input in [QUARTZ, OPAL, ETH_ADDRESS, ETH_ADDRESS_LOWERCASE] {
            let pair = eth_cross_account_id(input)?;
            assert_eq!(
                cross_account_id(&pair)?,
                cross_account_id_normalized(input)?
            );
        }

        assert_eq!(
            eth_cross_account_id_safe(ETH_ADDRESS),
            Some(EthCrossAccountId {
                eth: ETH_ADDRESS.to_owned(),
                sub: "0x00".to_owned(),
            })
        );
        assert_eq!(eth_cross_account_id_safe(""), None);

        Ok(())
    }

    #[test]
    fn invalid_input_fails() {
        let failing = [
            json!(QUARTZ_MANGLED),
            json!({ "Substrate": QUARTZ_MANGLED }),
            json!({ "substrate": QUARTZ_MANGLED }),
            json!({ "Substrate": ETH_ADDRESS }),
            json!(ETH_ADDRESS_MANGLED),
            json!({ "Ethereum": ETH_ADDRESS_MANGLED }),
            json!({ "ethereum": ETH_ADDRESS_MANGLED }),
            json!({ "Ethereum": QUARTZ }),
            json!(0),
            json!(null),
            json!({}),
            json!(""),
        ];

        for input in &failing {
            assert!(address(input).is_err(), "{input} resolved");
            assert_eq!(address_safe(input), None);
            assert!(address_for_scan_normalized(input).is_err());
            assert_eq!(address_for_scan_normalized_safe(input), None);
        }

        assert_eq!(cross_account_id_safe(&json!({ "ethereum": QUARTZ })), None);
    }

    #[test]
    fn scan_addresses() -> Result<(), AddressError> {
        for shape in substrate_shapes(QUARTZ) {
            assert_eq!(address_for_scan_normalized(&shape)?, OPAL);
            assert_eq!(address_for_scan_normalized_safe(&shape).as_deref(), Some(OPAL));
        }

        for shape in ethereum_shapes(ETH_ADDRESS)
            .into_iter()
            .chain(ethereum_shapes(ETH_ADDRESS_LOWERCASE))
        {
            assert_eq!(address_for_scan_normalized(&shape)?, ETH_ADDRESS_LOWERCASE);
            assert_eq!(
                address_for_scan_normalized_safe(&shape).as_deref(),
                Some(ETH_ADDRESS_LOWERCASE)
            );
        }

        Ok(())
    }

    #[test]
    fn comparisons_never_fail() {
        assert!(compare_substrate(OPAL, QUARTZ));
        assert!(compare_substrate(&json!({ "Substrate": QUARTZ }), UNIQUE));
        assert!(compare_substrate(&json!({ "substrate": OPAL }), &json!(UNIQUE)));
        assert!(!compare_substrate(&json!({ "Ethereum": ETH_ADDRESS }), OPAL));
        assert!(!compare_substrate(OPAL, OPAL_MANGLED));
        assert!(!compare_substrate(&json!(null), OPAL));

        assert!(compare_ethereum(ETH_ADDRESS, ETH_ADDRESS_LOWERCASE));
        assert!(compare_ethereum(
            &json!({ "ethereum": ETH_ADDRESS }),
            &json!({ "Ethereum": ETH_ADDRESS_LOWERCASE })
        ));
        assert!(!compare_ethereum(&json!({ "Substrate": OPAL }), ETH_ADDRESS));
        assert!(!compare_ethereum(ETH_ADDRESS, ETH_ADDRESS_MANGLED));
    }
}
