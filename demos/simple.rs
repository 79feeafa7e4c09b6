//! Decode a small record document and print it two ways.
//!
//! Run with: cargo run --example simple

use record_xml::{from_str, to_string_pretty};
use std::error::Error;

const XML: &str = r#"<root>
  <record index="1">
    <F C="TI" L="Title"><T>Principles of Chemistry.</T></F>
    <F C="KW" L="Keywords"><D><T>acids</T><T>bases</T>salts</D></F>
  </record>
  <record index="2">
    <F C="AB" L="Abstract"><T>First line;<BR/>second line</T></F>
  </record>
</root>"#;

fn main() -> Result<(), Box<dyn Error>> {
    let records = from_str(XML)?;

    for record in &records {
        print!("{}", record);
    }
    println!();

    println!("JSON output:\n{}", to_string_pretty(&records)?);

    Ok(())
}
