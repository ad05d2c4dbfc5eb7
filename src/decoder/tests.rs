//! Unit tests for buffer traversal.

use rstest::rstest;

use super::*;
use crate::{
    encoder::TlvEncoder,
    policy::{LengthWidth, TypeWidth},
};

fn policy(type_width: TypeWidth, length_width: LengthWidth) -> FieldWidthPolicy {
    FieldWidthPolicy::from_widths(type_width, length_width)
}

#[test]
fn rejects_actual_length_beyond_buffer() {
    let err = TlvIterable::new(FieldWidthPolicy::default(), &[0, 1, 2], 4)
        .expect_err("length exceeds buffer");
    assert_eq!(
        err,
        DecodeError::InvalidLength {
            length: 4,
            capacity: 3
        }
    );
}

#[test]
fn ignores_bytes_past_actual_length() {
    let buffer = [0, 1, 2, 0xde, 0xad];
    let iterable = TlvIterable::new(FieldWidthPolicy::default(), &buffer, 3).expect("valid length");
    let elements = iterable.to_vec().expect("valid region decodes");
    assert_eq!(elements.len(), 1);
    assert_eq!(elements[0].tag(), 0);
    assert_eq!(elements[0].as_byte(), Ok(2));
}

#[test]
fn empty_region_yields_nothing() {
    let iterable =
        TlvIterable::new(FieldWidthPolicy::default(), &[9, 9], 0).expect("zero length is valid");
    assert_eq!(iterable.elements().next(), None);
    assert!(iterable.is_valid());
}

#[test]
fn reads_wide_headers() {
    let p = policy(TypeWidth::Two, LengthWidth::Two);
    let buffer = [0, 0, 0, 4, 0, 0, 0, 2, 0, 2, 0, 2, 0, 3, 0, 55, 0, 0];
    let iterable = TlvIterable::new(p, &buffer, buffer.len()).expect("valid length");
    let elements = iterable.to_vec().expect("buffer decodes");

    let summary: Vec<_> = elements.iter().map(|e| (e.tag(), e.len(), e.offset())).collect();
    assert_eq!(summary, vec![(0, 4, 4), (2, 2, 12), (55, 0, 18)]);
    assert_eq!(elements[0].as_int(), Ok(2));
    assert_eq!(elements[1].as_short(), Ok(3));
    assert!(elements[2].is_empty());
    assert!(elements[2].as_bytes().is_empty());
}

#[test]
fn absent_type_width_reads_zero_tags() {
    let p = policy(TypeWidth::Absent, LengthWidth::One);
    let buffer = [1, 2, 3, 0, 1, 2];
    let iterable = TlvIterable::new(p, &buffer, buffer.len()).expect("valid length");
    let tags: Vec<u32> = iterable
        .elements()
        .map(|e| e.expect("element decodes").tag())
        .collect();
    assert_eq!(tags, vec![0, 0]);
}

#[rstest]
#[case::partial_header(&[0, 1, 2, 7][..], DecodeError::TruncatedHeader { offset: 3, have: 1, need: 2 })]
#[case::overrun(&[0, 1, 2, 7, 3, 1][..], DecodeError::TruncatedPayload { offset: 5, declared: 3, have: 1 })]
#[case::first_element(&[0, 9][..], DecodeError::TruncatedPayload { offset: 2, declared: 9, have: 0 })]
fn trailing_garbage_is_an_error(#[case] buffer: &[u8], #[case] expected: DecodeError) {
    let iterable =
        TlvIterable::new(FieldWidthPolicy::default(), buffer, buffer.len()).expect("valid length");
    let results: Vec<_> = iterable.elements().collect();

    assert_eq!(results.last(), Some(&Err(expected)));
    assert!(results[..results.len() - 1].iter().all(Result::is_ok));
    assert!(!iterable.is_valid());
    assert_eq!(iterable.to_vec(), Err(expected));
}

#[test]
fn iterator_is_fused_after_error() {
    let iterable = TlvIterable::new(FieldWidthPolicy::default(), &[5], 1).expect("valid length");
    let mut elements = iterable.elements();
    assert!(matches!(elements.next(), Some(Err(_))));
    assert_eq!(elements.next(), None);
    assert_eq!(elements.size_hint(), (0, Some(0)));
}

#[test]
fn traversals_restart_from_offset_zero() {
    let mut encoder = TlvEncoder::new(FieldWidthPolicy::default(), 8);
    encoder
        .put_byte(1, 1)
        .and_then(|e| e.put_byte(2, 2))
        .expect("elements fit");
    let frozen = encoder.freeze();
    let iterable = frozen.iterable();

    let mut first = iterable.elements();
    first.next();
    assert_eq!(first.offset(), 3);

    let tags: Vec<u32> = (&iterable)
        .into_iter()
        .map(|e| e.expect("element decodes").tag())
        .collect();
    assert_eq!(tags, vec![1, 2]);
    assert_eq!(iterable.elements().count(), 2);
}

#[test]
fn display_lists_elements_and_errors() {
    let buffer = [0, 1, 2, 55, 0, 3];
    let iterable =
        TlvIterable::new(FieldWidthPolicy::default(), &buffer, buffer.len()).expect("valid length");
    assert_eq!(
        iterable.to_string(),
        "[(T=0,L=1) 0x02,(T=55,L=0),<truncated header at offset 5: have 1, need 2>]"
    );
}

#[test]
fn shared_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TlvIterable<'static>>();
    assert_send_sync::<crate::encoder::TlvBuffer>();

    let mut encoder = TlvEncoder::new(FieldWidthPolicy::default(), 64);
    for tag in 0..8 {
        encoder.put_byte(tag, 0x10).expect("element fits");
    }
    let frozen = encoder.freeze();
    let iterable = frozen.iterable();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| iterable.to_vec().map(|elements| elements.len())))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().expect("thread panicked"), Ok(8));
        }
    });
}
