use crate::error::{CodecError, CodecResult};
use crate::value::{ColumnType, Value};

/// Field separator.
pub const DELIMITER: u8 = 0x1F;

/// Escape byte used to stuff [`DELIMITER`] and itself inside payloads.
pub const ESCAPE: u8 = 0x1B;

/// Encoding of a null value.
///
/// Stuffed payloads only ever contain `ESCAPE` followed by `ESCAPE` or
/// `DELIMITER`, so this sequence is distinct from every non-null encoding,
/// including a UTF-8 string whose raw bytes equal the sentinel.
pub const NULL_SENTINEL: [u8; 2] = [ESCAPE, 0x00];

/// A bounded run of one column's values, self-describing its name and type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
    pub name: String,
    pub column_type: ColumnType,
    pub values: Vec<Value>,
}

impl Chunk {
    pub fn new(name: impl Into<String>, column_type: ColumnType, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            column_type,
            values,
        }
    }

    /// Encode into the canonical byte stream.
    ///
    /// Fails if a non-null value does not match `column_type`.
    pub fn encode(&self) -> CodecResult<Vec<u8>> {
        let mut out = Vec::with_capacity(self.name.len() + 16 + self.values.len() * 9);
        stuff_into(&mut out, self.name.as_bytes());
        out.push(DELIMITER);
        stuff_into(&mut out, self.column_type.tag().as_bytes());

        for (index, value) in self.values.iter().enumerate() {
            out.push(DELIMITER);
            match (self.column_type, value) {
                (_, Value::Null) => out.extend_from_slice(&NULL_SENTINEL),
                (ColumnType::Utf8, Value::Utf8(s)) => stuff_into(&mut out, s.as_bytes()),
                (ColumnType::Int64, Value::Int64(v)) => stuff_into(&mut out, &v.to_be_bytes()),
                (ColumnType::Float64, Value::Float64(v)) => {
                    stuff_into(&mut out, &v.to_bits().to_be_bytes())
                }
                (ColumnType::Boolean, Value::Boolean(v)) => stuff_into(&mut out, &[u8::from(*v)]),
                (expected, other) => {
                    return Err(CodecError::TypeMismatch {
                        index,
                        expected,
                        // Null is handled by the first arm.
                        found: other.column_type().unwrap_or(expected),
                    })
                }
            }
        }
        Ok(out)
    }

    /// Decode a byte stream produced by [`Chunk::encode`].
    pub fn decode(bytes: &[u8]) -> CodecResult<Self> {
        let mut fields = split_fields(bytes)?.into_iter();

        let name = match fields.next() {
            Some(Field::Bytes(b)) => {
                String::from_utf8(b).map_err(|_| CodecError::InvalidUtf8 { field: 0 })?
            }
            _ => return Err(CodecError::MissingHeader),
        };
        let column_type = match fields.next() {
            Some(Field::Bytes(b)) => {
                let tag = String::from_utf8(b).map_err(|_| CodecError::InvalidUtf8 { field: 1 })?;
                tag.parse::<ColumnType>()?
            }
            _ => return Err(CodecError::MissingHeader),
        };

        let values = fields
            .enumerate()
            .map(|(index, field)| decode_value(index, column_type, field))
            .collect::<CodecResult<Vec<_>>>()?;

        Ok(Self {
            name,
            column_type,
            values,
        })
    }
}

/// One field after unstuffing.
#[derive(Debug, PartialEq, Eq)]
enum Field {
    Null,
    Bytes(Vec<u8>),
}

fn stuff_into(out: &mut Vec<u8>, payload: &[u8]) {
    for &b in payload {
        if b == DELIMITER || b == ESCAPE {
            out.push(ESCAPE);
        }
        out.push(b);
    }
}

fn split_fields(bytes: &[u8]) -> CodecResult<Vec<Field>> {
    let mut fields = Vec::new();
    let mut current = Vec::new();
    let mut is_null = false;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if is_null && b != DELIMITER {
            return Err(CodecError::MalformedNull { offset: i });
        }
        match b {
            DELIMITER => {
                fields.push(finish(&mut current, &mut is_null));
            }
            ESCAPE => match bytes.get(i + 1) {
                Some(&next) if next == ESCAPE || next == DELIMITER => {
                    current.push(next);
                    i += 1;
                }
                Some(&0x00) if current.is_empty() => {
                    is_null = true;
                    i += 1;
                }
                Some(&0x00) => return Err(CodecError::MalformedNull { offset: i }),
                _ => return Err(CodecError::DanglingEscape { offset: i }),
            },
            _ => current.push(b),
        }
        i += 1;
    }
    fields.push(finish(&mut current, &mut is_null));
    Ok(fields)
}

fn finish(current: &mut Vec<u8>, is_null: &mut bool) -> Field {
    if std::mem::take(is_null) {
        Field::Null
    } else {
        Field::Bytes(std::mem::take(current))
    }
}

fn decode_value(index: usize, column_type: ColumnType, field: Field) -> CodecResult<Value> {
    let bytes = match field {
        Field::Null => return Ok(Value::Null),
        Field::Bytes(b) => b,
    };
    match column_type {
        ColumnType::Utf8 => String::from_utf8(bytes)
            .map(Value::Utf8)
            .map_err(|_| CodecError::InvalidUtf8 { field: index + 2 }),
        ColumnType::Int64 => Ok(Value::Int64(i64::from_be_bytes(fixed_width(index, &bytes)?))),
        ColumnType::Float64 => Ok(Value::Float64(f64::from_bits(u64::from_be_bytes(
            fixed_width(index, &bytes)?,
        )))),
        ColumnType::Boolean => match bytes.as_slice() {
            [0] => Ok(Value::Boolean(false)),
            [1] => Ok(Value::Boolean(true)),
            [byte] => Err(CodecError::InvalidBoolean { index, byte: *byte }),
            other => Err(CodecError::InvalidWidth {
                index,
                expected: 1,
                actual: other.len(),
            }),
        },
    }
}

fn fixed_width(index: usize, bytes: &[u8]) -> CodecResult<[u8; 8]> {
    bytes.try_into().map_err(|_| CodecError::InvalidWidth {
        index,
        expected: 8,
        actual: bytes.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn roundtrip(chunk: &Chunk) -> Chunk {
        Chunk::decode(&chunk.encode().unwrap()).unwrap()
    }

    #[test]
    fn layout_of_simple_int_chunk() {
        let chunk = Chunk::new("n", ColumnType::Int64, vec![Value::Int64(1), Value::Null]);
        let mut expected = b"n\x1Fint64\x1F".to_vec();
        expected.extend_from_slice(&1i64.to_be_bytes());
        expected.push(DELIMITER);
        expected.extend_from_slice(&NULL_SENTINEL);
        assert_eq!(chunk.encode().unwrap(), expected);
    }

    #[test]
    fn empty_chunk_roundtrips() {
        let chunk = Chunk::new("empty", ColumnType::Utf8, vec![]);
        assert_eq!(roundtrip(&chunk), chunk);
    }

    #[test]
    fn empty_string_is_not_null() {
        let chunk = Chunk::new(
            "s",
            ColumnType::Utf8,
            vec![Value::from(""), Value::Null, Value::from("")],
        );
        assert_eq!(roundtrip(&chunk), chunk);
    }

    #[test]
    fn delimiter_and_escape_bytes_inside_payloads() {
        let chunk = Chunk::new(
            "we\x1Fird\x1Bname",
            ColumnType::Int64,
            vec![
                Value::Int64(0x1F1F_1F1F_1F1F_1F1F),
                Value::Int64(0x1B00_0000_0000_001B),
                Value::Int64(-1),
            ],
        );
        assert_eq!(roundtrip(&chunk), chunk);
    }

    #[test]
    fn string_equal_to_sentinel_bytes_stays_a_string() {
        let raw = String::from_utf8(NULL_SENTINEL.to_vec()).unwrap();
        let chunk = Chunk::new("s", ColumnType::Utf8, vec![Value::Utf8(raw.clone()), Value::Null]);
        let decoded = roundtrip(&chunk);
        assert_eq!(decoded.values[0], Value::Utf8(raw));
        assert_eq!(decoded.values[1], Value::Null);
    }

    #[test]
    fn floats_are_bit_exact() {
        let chunk = Chunk::new(
            "f",
            ColumnType::Float64,
            vec![
                Value::Float64(0.1),
                Value::Float64(-0.0),
                Value::Float64(f64::NAN),
                Value::Float64(f64::INFINITY),
            ],
        );
        assert_eq!(roundtrip(&chunk), chunk);
    }

    #[test]
    fn booleans_roundtrip() {
        let chunk = Chunk::new(
            "b",
            ColumnType::Boolean,
            vec![Value::Boolean(true), Value::Null, Value::Boolean(false)],
        );
        assert_eq!(roundtrip(&chunk), chunk);
    }

    #[test]
    fn encoding_is_deterministic() {
        let chunk = Chunk::new("x", ColumnType::Float64, vec![Value::Float64(1.5); 3]);
        assert_eq!(chunk.encode().unwrap(), chunk.encode().unwrap());
    }

    #[test]
    fn type_mismatch_is_rejected() {
        let chunk = Chunk::new("x", ColumnType::Int64, vec![Value::Int64(1), Value::from("a")]);
        assert_eq!(
            chunk.encode().unwrap_err(),
            CodecError::TypeMismatch {
                index: 1,
                expected: ColumnType::Int64,
                found: ColumnType::Utf8,
            }
        );
    }

    #[test]
    fn decode_rejects_missing_header() {
        assert_eq!(Chunk::decode(b"").unwrap_err(), CodecError::MissingHeader);
        assert_eq!(Chunk::decode(b"name").unwrap_err(), CodecError::MissingHeader);
    }

    #[test]
    fn decode_rejects_unknown_type() {
        assert_eq!(
            Chunk::decode(b"n\x1Fdecimal").unwrap_err(),
            CodecError::UnknownType("decimal".into())
        );
    }

    #[test]
    fn decode_rejects_bad_width() {
        let err = Chunk::decode(b"n\x1Fint64\x1F\x01\x02").unwrap_err();
        assert_eq!(
            err,
            CodecError::InvalidWidth {
                index: 0,
                expected: 8,
                actual: 2
            }
        );
    }

    #[test]
    fn decode_rejects_dangling_escape() {
        let err = Chunk::decode(b"n\x1Futf8\x1Fab\x1B").unwrap_err();
        assert!(matches!(err, CodecError::DanglingEscape { .. }));
    }

    #[test]
    fn decode_rejects_sentinel_inside_field() {
        let err = Chunk::decode(b"n\x1Futf8\x1Fa\x1B\x00").unwrap_err();
        assert!(matches!(err, CodecError::MalformedNull { .. }));
        let err = Chunk::decode(b"n\x1Futf8\x1F\x1B\x00a").unwrap_err();
        assert!(matches!(err, CodecError::MalformedNull { .. }));
    }

    proptest! {
        #[test]
        fn int64_roundtrip(values in prop::collection::vec(prop::option::of(any::<i64>()), 0..64)) {
            let values: Vec<Value> = values.into_iter().map(Value::from).collect();
            let chunk = Chunk::new("ints", ColumnType::Int64, values);
            prop_assert_eq!(roundtrip(&chunk), chunk);
        }

        #[test]
        fn float64_roundtrip(bits in prop::collection::vec(prop::option::of(any::<u64>()), 0..64)) {
            let values: Vec<Value> = bits
                .into_iter()
                .map(|b| b.map(f64::from_bits).into())
                .collect();
            let chunk = Chunk::new("floats", ColumnType::Float64, values);
            prop_assert_eq!(roundtrip(&chunk), chunk);
        }

        #[test]
        fn utf8_roundtrip(
            name in ".*",
            values in prop::collection::vec(prop::option::of(".*"), 0..32),
        ) {
            let values: Vec<Value> = values
                .into_iter()
                .map(|v| v.map_or(Value::Null, Value::Utf8))
                .collect();
            let chunk = Chunk::new(name, ColumnType::Utf8, values);
            prop_assert_eq!(roundtrip(&chunk), chunk);
        }

        #[test]
        fn boolean_roundtrip(values in prop::collection::vec(prop::option::of(any::<bool>()), 0..64)) {
            let values: Vec<Value> = values.into_iter().map(Value::from).collect();
            let chunk = Chunk::new("flags", ColumnType::Boolean, values);
            prop_assert_eq!(roundtrip(&chunk), chunk);
        }
    }
}
