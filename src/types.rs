use serde::{Deserialize, Serialize};
use shrinkwraprs::Shrinkwrap;

macro_rules! impl_primitive_num {
    (pub struct $outer:ident($tname:ty)) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            Serialize,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Deserialize,
            Shrinkwrap,
        )]
        #[serde(transparent)]
        pub struct $outer(pub $tname);

        impl std::fmt::Display for $outer {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl std::str::FromStr for $outer {
            type Err = <$tname as std::str::FromStr>::Err;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

impl_primitive_num!(pub struct ChainId(u64));
impl_primitive_num!(pub struct Confirmations(usize));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_id_is_a_bare_number_in_yaml() {
        let chain_id: ChainId = serde_yaml::from_str("10143").unwrap();

        assert_eq!(chain_id, ChainId(10143));
        assert_eq!(serde_yaml::to_string(&chain_id).unwrap().trim(), "10143");
    }

    #[test]
    fn confirmations_parse_from_cli_text() {
        assert_eq!(" 3 ".parse::<Confirmations>().unwrap(), Confirmations(3));
        assert!("three".parse::<Confirmations>().is_err());
    }
}
