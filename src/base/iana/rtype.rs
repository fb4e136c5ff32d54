//! Resource Record (RR) TYPEs

//------------ Rtype ---------------------------------------------------------

int_enum! {
    /// Resource Record Types.
    ///
    /// Each resource records has a 16 bit type value indicating what kind of
    /// information is represented by the record. Only the A type has a
    /// constant here. Answers of any other type are skipped by the stub
    /// resolver without being looked at.
    ///
    /// [IANA registry]: http://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-4
    =>
    Rtype, u16;

    /// A host address.
    (A => 1, "A")
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::Rtype;

    #[test]
    fn mnemonics() {
        assert_eq!(Rtype::A.to_mnemonic_str(), Some("A"));
        assert_eq!(Rtype::from_int(5).to_mnemonic_str(), None);
        assert_eq!(Rtype::from_int(99).to_mnemonic_str(), None);
    }

    #[cfg(feature = "std")]
    #[test]
    fn debug_and_display() {
        use std::format;

        assert_eq!(format!("{:?}", Rtype::A), "Rtype::A");
        assert_eq!(format!("{:?}", Rtype::from_int(99)), "Rtype(99)");
        assert_eq!(format!("{}", Rtype::A), "A");
        assert_eq!(format!("{}", Rtype::from_int(99)), "99");
    }
}
