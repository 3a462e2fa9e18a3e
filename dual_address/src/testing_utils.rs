//! Shared fixtures for the unit tests.

use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

/// One account rendered under network 42.
pub(crate) const OPAL: &str = "5D7WxWqqUYNm962RUNdf1UTCcuasXCigHFMGG4hWX6hkp7zU";
/// The same account under network 255.
pub(crate) const QUARTZ: &str = "yGDnKaHASMGaWSKS4Tv3SNQpTyJH89Ao3LfhgzcMbdhz6y2VT";
/// The same account under network 7391.
pub(crate) const UNIQUE: &str = "unfZsSFU21ZtJwkEztT1Tc7c6T9R9GxseJgeUDwFQLSs8UDLb";
/// Ethereum mirror of [`OPAL`].
pub(crate) const ETH_MIRROR: &str = "0x2E61479A581F023808AAa5f2EC90bE6c2b250102";
/// Substrate mirror of [`ETH_MIRROR`].
pub(crate) const DOUBLE_MIRROR: &str = "5HikVEnsQT3U9LyTh5X9Bewud1wv4WkS7ovxrHRMCT2DFZPY";

pub(crate) const QUARTZ_MANGLED: &str = "yGDnKaHASMGaWSKS4Tv3SNQpTyJH89Ao3LfhgzcMbdhz6y2V";
pub(crate) const OPAL_MANGLED: &str = "5D7WxWqqUYNm962RUNdf1UTCcuasXCigHFMGG4hWX6hkp7z";
pub(crate) const ETH_ADDRESS_MANGLED: &str = "0xFbbdd160b7A5Dc08C1D803Fe5E03Ba213D91041";

pub(crate) const ETH_ADDRESS: &str = "0xFbbdd160b7A5Dc08C1D803Fe5E03Ba213D910415";
pub(crate) const ETH_ADDRESS_LOWERCASE: &str = "0xfbbdd160b7a5dc08c1d803fe5e03ba213d910415";
/// Substrate mirror of [`ETH_ADDRESS`] under network 42.
pub(crate) const SUB_MIRROR_OF_ETH_ADDRESS: &str =
    "5Hao9DtZTNpCqUju8oGmtaCzau7zWMR3rBQkFfvE3suTu6aE";
/// Substrate mirror of [`ETH_ADDRESS`] under network 255.
pub(crate) const SUB_MIRROR_OF_ETH_ADDRESS_PREFIX_255: &str =
    "yGJFbkzDAL71x8i9Y8LgZFWaFwHpF8KVQubmAzDaKAVBp4BnU";

pub(crate) fn common_setup() {
    // Try init since multiple tests calling `init` will cause an error.
    let _ = pretty_env_logger::try_init();
}

/// Random 32 byte public keys paired with random, assignable network ids.
pub(crate) fn gen_n_random_keys_and_formats(
    n: usize,
    seed: u64,
) -> impl Iterator<Item = ([u8; 32], u16)> {
    let mut rng = StdRng::seed_from_u64(seed);

    (0..n).map(move |_| {
        let mut key = [0u8; 32];
        rng.fill_bytes(&mut key);

        let format = loop {
            let format = rng.gen_range(0..=0x3fff_u16);
            if format != 46 && format != 47 {
                break format;
            }
        };

        (key, format)
    })
}
