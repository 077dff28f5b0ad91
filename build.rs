use std::{
    fmt::Display,
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::PathBuf,
};

#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct Country {
    index: u16,
    code: String,
    name: String,
}

impl Country {
    fn api_code(&self) -> String {
        self.code.to_ascii_lowercase()
    }
}

impl Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Country::{}", self.code)
    }
}

fn gen_country_enum_decl<'a, W: Write, C: Iterator<Item = &'a Country>>(
    out: &mut W,
    countries: C,
) -> std::io::Result<()> {
    let mut reverse_lookup = phf_codegen::Map::<String>::new();

    out.write_all(b"declare_countries![\n")?;
    for c in countries {
        writeln!(out, "{}: {:?} {:?} {},", c.code, c.api_code(), c.name, c.index)?;
        reverse_lookup.entry(c.api_code(), c.to_string());
    }
    out.write_all(b"];\n")?;

    writeln!(
        out,
        "pub(crate) static CODE_TO_COUNTRY: phf::Map<&'static str, Country> = {};",
        reverse_lookup.build()
    )?;

    Ok(())
}

fn main() {
    let root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").unwrap());
    let countries_path = root.join("countries.csv");
    println!("cargo:rerun-if-changed={}", countries_path.display());

    let mut countries: Vec<Country> = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(BufReader::new(match File::open(&countries_path) {
            Ok(it) => it,
            Err(_) => {
                panic!("missing {}", countries_path.display())
            }
        }))
        .records()
        .filter_map(Result::ok)
        .map(|it| {
            let mut it = it.iter().map(String::from);
            (
                it.next().expect("invalid row countries.csv"),
                it.next().expect("invalid row countries.csv"),
            )
        })
        .map(|(code, name)| Country {
            index: 0,
            code: code.to_ascii_uppercase(),
            name,
        })
        .collect();
    countries.sort_by(|a, b| a.code.cmp(&b.code));
    countries.dedup_by(|a, b| a.code == b.code);
    countries.iter_mut().enumerate().for_each(|(i, it)| {
        it.index = i as u16;
    });

    let out_dir = PathBuf::from(&std::env::var("OUT_DIR").unwrap());
    let countries_out = out_dir.join("decl_countries.rs");
    let mut countries_out =
        BufWriter::new(File::create(countries_out).expect("unable to create decl_countries.rs"));
    gen_country_enum_decl(&mut countries_out, countries.iter()).unwrap();
}
