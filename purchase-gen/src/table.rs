use std::io;
use std::path::Path;

use csv::{ReaderBuilder, Terminator, Trim, WriterBuilder};
use log::debug;

use crate::error::PurchaseError;
use crate::purchase::{PurchaseRecord, HEADER};

/// Writes the header row followed by one row per record.
///
/// The header is written even when `purchases` is empty.
///
/// # Errors
/// Errors when a row cannot be encoded or the underlying writer fails
pub fn write_records<W: io::Write>(
    writer: W,
    purchases: &[PurchaseRecord],
) -> Result<(), PurchaseError> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::CRLF)
        .from_writer(writer);

    writer.write_record(&HEADER)?;
    for purchase in purchases {
        writer.serialize(purchase)?;
    }
    writer.flush()?;
    debug!("Wrote {} purchase rows", purchases.len());

    Ok(())
}

/// # Errors
/// Errors when the file cannot be created or written
pub fn write_csv_file<P: AsRef<Path>>(
    path: P,
    purchases: &[PurchaseRecord],
) -> Result<(), PurchaseError> {
    let file = std::fs::File::create(path)?;
    write_records(io::BufWriter::new(file), purchases)
}

/// Parses rows written by [`write_records`].
///
/// # Errors
/// Errors on malformed rows, including negative prices or ratings
pub fn read_records<R: io::Read>(reader: R) -> Result<Vec<PurchaseRecord>, PurchaseError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut purchases = Vec::new();
    for record in reader.deserialize() {
        purchases.push(record?);
    }
    Ok(purchases)
}

#[cfg(test)]
mod tests {
    use std::convert::TryFrom;

    use super::*;
    use crate::purchase::{customer_name, CustomerId, Price, ProductId, Rating};

    fn make_purchase(customer: u32, product_name: &str, price: f64) -> PurchaseRecord {
        PurchaseRecord {
            customer_id: CustomerId::from_sequence(customer),
            customer_name: customer_name(customer),
            product_id: ProductId::from_sequence(77),
            product_name: product_name.to_owned(),
            category: "Books & Media".to_owned(),
            price: Price::try_from(price).unwrap(),
            brand: "KidRead".to_owned(),
            rating: Rating::try_from(4.0).unwrap(),
        }
    }

    #[test]
    fn test_write_records() {
        let purchases = vec![
            make_purchase(1, "Children's Book", 8.0),
            make_purchase(2, "Book, Illustrated", 19.5),
        ];
        let mut out = Vec::new();
        write_records(&mut out, &purchases).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.ends_with("\r\n"));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "customer_id,customer_name,product_id,product_name,category,price,brand,rating",
                "C0001,Customer 1,P0077,Children's Book,Books & Media,8.00,KidRead,4.0",
                "C0002,Customer 2,P0077,\"Book, Illustrated\",Books & Media,19.50,KidRead,4.0",
            ]
        );
    }

    #[test]
    fn test_write_empty_keeps_header() {
        let mut out = Vec::new();
        write_records(&mut out, &[]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "customer_id,customer_name,product_id,product_name,category,price,brand,rating\r\n"
        );
    }

    #[test]
    fn test_read_back_written_rows() {
        let purchases = vec![
            make_purchase(1, "Children's Book", 8.0),
            make_purchase(1, "Book, Illustrated", 19.999),
            make_purchase(3, "Travel Guide", 15.1),
        ];
        let mut out = Vec::new();
        write_records(&mut out, &purchases).unwrap();
        let parsed = read_records(out.as_slice()).unwrap();
        assert_eq!(parsed, purchases);
        assert_eq!(parsed[1].price.to_string(), "20.00");
        assert_eq!(parsed[2].price.to_string(), "15.10");
    }

    #[test]
    fn test_read_rejects_negative_price() {
        let data = "customer_id,customer_name,product_id,product_name,category,price,brand,rating\n\
                    C0001,Customer 1,P0001,Yoga Mat,Sports & Fitness,-3.00,FitLife,4.1\n";
        assert!(matches!(
            read_records(data.as_bytes()),
            Err(PurchaseError::CsvError(_))
        ));
    }
}
