use crate::Error;

macro_rules! declare_countries {
    ($($code: ident: $str_code: literal $name: literal $val:literal),* $(,)?) => {
        /// Two-letter country codes as specified by ISO 3166-1 alpha-2.
        #[allow(dead_code)]
        #[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
        #[repr(u16)]
        pub enum Country {$(
            #[doc = $name]
            $code = $val
        ),*}

        impl Country {
            const CODES: &[&'static str] = &[$(
                $str_code
            ),*];
            const NAMES: &[&'static str] = &[$(
                $name
            ),*];
        }
    };
}

include!(concat!(env!("OUT_DIR"), "/decl_countries.rs"));

impl Country {
    /// Lower-case code, as the holiday API and output file names expect it.
    pub fn code(&self) -> &'static str {
        Self::CODES[*self as usize]
    }

    // Returns a long name
    pub fn name(&self) -> &'static str {
        Self::NAMES[*self as usize]
    }
}

impl std::str::FromStr for Country {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        CODE_TO_COUNTRY
            .get(code.as_str())
            .copied()
            .ok_or_else(|| Error::UnknownCountry(s.to_string()))
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl AsRef<str> for Country {
    fn as_ref(&self) -> &str {
        self.code()
    }
}
