//! Binary encoding of SDP data elements and service records.
//!
//! Data elements are encoded as a one-byte header (type descriptor in the
//! high five bits, size index in the low three) followed by the payload.
//! Multi-byte integers, UUIDs, and lengths are big-endian on the wire.

use super::types::{DataElement, ServiceRecord};
use byteorder::{BigEndian, WriteBytesExt};

// Type descriptor values
const TYPE_NIL: u8 = 0;
const TYPE_UINT: u8 = 1;
const TYPE_UUID: u8 = 3;
const TYPE_TEXT: u8 = 4;
const TYPE_BOOL: u8 = 5;
const TYPE_SEQUENCE: u8 = 6;
const TYPE_ALTERNATIVE: u8 = 7;
const TYPE_URL: u8 = 8;

// Size index values: 0..=4 are fixed sizes 1/2/4/8/16 bytes,
// 5 and 6 prefix the payload with a u8 or u16 length.
const SIZE_1: u8 = 0;
const SIZE_2: u8 = 1;
const SIZE_4: u8 = 2;
const SIZE_16: u8 = 4;
const SIZE_U8_LEN: u8 = 5;
const SIZE_U16_LEN: u8 = 6;

const fn header(type_: u8, size_index: u8) -> u8 {
    (type_ << 3) | size_index
}

fn encode_variable(type_: u8, payload: &[u8], out: &mut Vec<u8>) {
    if payload.len() <= u8::MAX as usize {
        out.push(header(type_, SIZE_U8_LEN));
        out.push(payload.len() as u8);
    } else {
        assert!(
            payload.len() <= u16::MAX as usize,
            "data element payload exceeds the u16 length prefix"
        );
        out.push(header(type_, SIZE_U16_LEN));
        out.write_u16::<BigEndian>(payload.len() as u16).unwrap();
    }
    out.extend_from_slice(payload);
}

impl DataElement {
    /// Encode this element to its binary wire form.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode_into(&mut out);
        out
    }

    fn encode_into(&self, out: &mut Vec<u8>) {
        match self {
            DataElement::Nil => out.push(header(TYPE_NIL, SIZE_1)),
            DataElement::Unsigned8(value) => {
                out.push(header(TYPE_UINT, SIZE_1));
                out.push(*value);
            }
            DataElement::Unsigned16(value) => {
                out.push(header(TYPE_UINT, SIZE_2));
                out.write_u16::<BigEndian>(*value).unwrap();
            }
            DataElement::Unsigned32(value) => {
                out.push(header(TYPE_UINT, SIZE_4));
                out.write_u32::<BigEndian>(*value).unwrap();
            }
            DataElement::Boolean(value) => {
                out.push(header(TYPE_BOOL, SIZE_1));
                out.push(*value as u8);
            }
            DataElement::Uuid(uuid) => {
                let be = uuid.to_be_bytes();
                match be.len() {
                    2 => out.push(header(TYPE_UUID, SIZE_2)),
                    _ => out.push(header(TYPE_UUID, SIZE_16)),
                }
                out.extend_from_slice(&be);
            }
            DataElement::TextString(s) => encode_variable(TYPE_TEXT, s.as_bytes(), out),
            DataElement::Url(s) => encode_variable(TYPE_URL, s.as_bytes(), out),
            DataElement::Sequence(elements) => {
                encode_variable(TYPE_SEQUENCE, &encode_all(elements), out)
            }
            DataElement::Alternative(elements) => {
                encode_variable(TYPE_ALTERNATIVE, &encode_all(elements), out)
            }
        }
    }
}

fn encode_all(elements: &[DataElement]) -> Vec<u8> {
    let mut payload = Vec::new();
    for element in elements {
        element.encode_into(&mut payload);
    }
    payload
}

impl ServiceRecord {
    /// Encode the record as a binary attribute list.
    ///
    /// The wire form is a single sequence of (attribute id, value) pairs in
    /// ascending attribute-id order, each id encoded as a 16-bit unsigned
    /// data element.
    pub fn encode(&self) -> Vec<u8> {
        let mut pairs = Vec::with_capacity(self.len() * 2);
        for (id, value) in self.iter() {
            pairs.push(DataElement::Unsigned16(id));
            pairs.push(value.clone());
        }
        DataElement::Sequence(pairs).encode()
    }
}
