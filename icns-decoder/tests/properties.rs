mod common;

use common::{container, encode};
use icns_decoder::{decode, DecoderError, Entry, Header, TypeTag};
use proptest::prelude::*;

fn arb_entry() -> impl Strategy<Value = Entry> {
    (any::<[u8; 4]>(), prop::collection::vec(any::<u8>(), 0..64)).prop_map(|(tag, payload)| {
        Entry {
            type_tag: TypeTag(tag),
            declared_length: payload.len() as u32 + 8,
            payload,
        }
    })
}

proptest! {
    #[test]
    fn prop_round_trip(entries in prop::collection::vec(arb_entry(), 0..8)) {
        let original = container(entries);
        let decoded = decode(&mut encode(&original).as_slice()).unwrap();
        prop_assert_eq!(decoded, original);
    }

    #[test]
    fn prop_magic_gate(
        magic in any::<[u8; 4]>().prop_filter("not icns", |m| m != b"icns"),
        rest in prop::collection::vec(any::<u8>(), 4..128),
    ) {
        let mut bytes = magic.to_vec();
        bytes.extend_from_slice(&rest);

        let is_invalid_magic = matches!(
            decode(&mut bytes.as_slice()),
            Err(DecoderError::InvalidMagic { found }) if found == TypeTag(magic)
        );
        prop_assert!(is_invalid_magic);
    }

    #[test]
    fn prop_any_truncation_is_an_error(
        entries in prop::collection::vec(arb_entry(), 1..6),
        cut in any::<prop::sample::Index>(),
    ) {
        let last_len = entries.last().unwrap().declared_length as usize;
        let bytes = encode(&container(entries));
        let last_start = bytes.len() - last_len;
        // Cut strictly inside the last entry so no clean boundary remains
        let cut_at = last_start + 1 + cut.index(last_len - 1);

        prop_assert!(decode(&mut &bytes[..cut_at]).is_err());
    }

    #[test]
    fn prop_type_tag_text_round_trip(bytes in any::<[u8; 4]>()) {
        let tag = TypeTag(bytes);
        let text = String::from(tag);
        prop_assert_eq!(TypeTag::try_from(text).unwrap(), tag);
    }

    #[test]
    fn prop_header_serde_round_trip(magic in any::<[u8; 4]>(), total_length in any::<u32>()) {
        let header = Header { magic: TypeTag(magic), total_length };
        let json = serde_json::to_string(&header).unwrap();
        let back: Header = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, header);
    }
}
