use exlibris_record::{
    CoercionError, FieldDescriptor, FieldKind, FieldValue, InstantiationError, Record, describe,
};

#[derive(Debug, Default, PartialEq, Record)]
#[record(rename_all = "camelCase")]
struct Book {
    title: Option<String>,
    author: Option<String>,
    publish_year: i32,
}

#[derive(Debug, Default, Record)]
struct Catalogue {
    shelf: String,
    count: u8,
    ratio: f64,
    tags: Vec<String>,
    #[record(skip)]
    internal: String,
    #[record(rename = "ISBN")]
    isbn: Option<u64>,
}

#[derive(Debug, Default, Record)]
#[record(rename = "Libro")]
struct SpanishBook {
    r#type: String,
}

#[test]
fn test_descriptor_table_in_declaration_order() {
    assert_eq!(
        Book::fields(),
        &[
            FieldDescriptor::nullable("title", FieldKind::String),
            FieldDescriptor::nullable("author", FieldKind::String),
            FieldDescriptor::new("publishYear", FieldKind::Integer),
        ]
    );
    assert_eq!(describe::<Book>(), Book::fields());
}

#[test]
fn test_unsupported_and_skipped_fields_are_excluded() {
    let names: Vec<_> = Catalogue::fields().iter().map(|f| f.name).collect();
    assert_eq!(names, ["shelf", "count", "ISBN"]);
    assert_eq!(Catalogue::fields()[1].kind, FieldKind::Integer);
    assert!(Catalogue::fields()[2].nullable);
}

#[test]
fn test_type_and_element_names() {
    assert_eq!(Book::TYPE_NAME, "Book");
    assert_eq!(Book::element_name(), "book");
    assert_eq!(SpanishBook::TYPE_NAME, "Libro");
    assert_eq!(SpanishBook::element_name(), "libro");
    assert_eq!(SpanishBook::fields()[0].name, "type");
}

#[test]
fn test_value_of_reports_null_as_none() {
    let book = Book {
        title: Some("1984".to_string()),
        author: None,
        publish_year: 1949,
    };

    assert_eq!(book.value_of("title"), Some(FieldValue::from("1984")));
    assert_eq!(book.value_of("author"), None);
    assert_eq!(book.value_of("publishYear"), Some(FieldValue::Integer(1949)));
    assert_eq!(book.value_of("publish_year"), None);

    let values: Vec<_> = book
        .field_values()
        .into_iter()
        .map(|(field, value)| (field.name, value))
        .collect();
    assert_eq!(
        values,
        [
            ("title", FieldValue::from("1984")),
            ("publishYear", FieldValue::Integer(1949)),
        ]
    );
}

#[test]
fn test_instantiate_and_assign() -> Result<(), CoercionError> {
    let mut book = Book::instantiate().expect("Book has a zero value");
    assert_eq!(book, Book::default());

    book.assign("title", FieldValue::from("Don Quijote"))?;
    book.assign("author", FieldValue::from("Miguel de Cervantes"))?;
    book.assign("publishYear", FieldValue::Integer(1605))?;

    assert_eq!(
        book,
        Book {
            title: Some("Don Quijote".to_string()),
            author: Some("Miguel de Cervantes".to_string()),
            publish_year: 1605,
        }
    );
    Ok(())
}

#[test]
fn test_assign_rejects_out_of_range_and_wrong_kind() {
    let mut catalogue = Catalogue::default();

    let err = catalogue
        .assign("count", FieldValue::Integer(300))
        .unwrap_err();
    assert_eq!(
        err,
        CoercionError::OutOfRange {
            field: "count",
            value: 300
        }
    );
    assert_eq!(catalogue.count, 0);

    let err = catalogue
        .assign("shelf", FieldValue::Integer(3))
        .unwrap_err();
    assert!(matches!(
        err,
        CoercionError::KindMismatch {
            field: "shelf",
            expected: FieldKind::String,
            found: FieldKind::Integer,
        }
    ));

    let err = catalogue
        .assign("internal", FieldValue::from("x"))
        .unwrap_err();
    assert!(matches!(err, CoercionError::UnknownField { .. }));
}

#[test]
fn test_unsigned_values_beyond_i64_are_unrepresentable() {
    let catalogue = Catalogue {
        isbn: Some(u64::MAX),
        ..Default::default()
    };
    assert_eq!(catalogue.value_of("ISBN"), None);
    assert_eq!(
        catalogue.try_value_of("ISBN"),
        Err(CoercionError::Unrepresentable {
            field: "ISBN",
            value: "18446744073709551615".to_string(),
        })
    );
    assert_eq!(catalogue.try_value_of("shelf"), Ok(Some(FieldValue::from(""))));
    assert_eq!(catalogue.try_value_of("internal"), Ok(None));

    let catalogue = Catalogue {
        isbn: Some(9_788_420_412_146),
        ..Default::default()
    };
    assert_eq!(
        catalogue.value_of("ISBN"),
        Some(FieldValue::Integer(9_788_420_412_146))
    );
}

/// A record without a zero value, implemented by hand.
struct Signed {
    signature: String,
}

impl Record for Signed {
    const TYPE_NAME: &'static str = "Signed";

    fn fields() -> &'static [FieldDescriptor] {
        const FIELDS: &[FieldDescriptor] = &[FieldDescriptor::new("signature", FieldKind::String)];
        FIELDS
    }

    fn value_of(&self, field: &str) -> Option<FieldValue> {
        (field == "signature").then(|| FieldValue::from(self.signature.as_str()))
    }

    fn instantiate() -> Result<Self, InstantiationError> {
        Err(InstantiationError::new(Self::TYPE_NAME, "a signature is required"))
    }

    fn assign(&mut self, field: &str, value: FieldValue) -> Result<(), CoercionError> {
        match (field, value) {
            ("signature", FieldValue::String(s)) => {
                self.signature = s;
                Ok(())
            }
            (field, _) => Err(CoercionError::UnknownField {
                field: field.to_string(),
            }),
        }
    }
}

#[test]
fn test_manual_record_without_zero_value() {
    let err = Signed::instantiate().err().expect("instantiation must fail");
    assert_eq!(err.type_name, "Signed");

    let signed = Signed {
        signature: "R.F.J.R.".to_string(),
    };
    assert_eq!(signed.field_values().len(), 1);
}
