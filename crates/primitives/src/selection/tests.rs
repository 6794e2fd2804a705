use proptest::prelude::*;

use super::*;

#[test]
fn forward_pair_canonicalizes_with_end_active() {
	let sel = AcpSelection::from(TextSelection::new(2, 7));
	assert_eq!((sel.start, sel.end), (2, 7));
	assert_eq!(sel.style.active_end, ActiveSelEnd::End);
	assert!(!sel.style.interim_char);
}

#[test]
fn backward_pair_canonicalizes_with_start_active() {
	let sel = AcpSelection::from(TextSelection::new(7, 2));
	assert_eq!((sel.start, sel.end), (2, 7));
	assert_eq!(sel.style.active_end, ActiveSelEnd::Start);
	assert_eq!(sel.caret_offset(), Some(2));
}

#[test]
fn new_reorders_bounds() {
	let sel = AcpSelection::new(9, 4);
	assert_eq!((sel.start, sel.end), (4, 9));
	assert_eq!(sel.caret_offset(), Some(9));
}

#[test]
fn no_active_end_has_no_caret() {
	let sel = AcpSelection::new(1, 3).with_active_end(ActiveSelEnd::None);
	assert_eq!(sel.caret_offset(), None);
	assert_eq!(TextSelection::from(sel), TextSelection::new(1, 3));
}

#[test]
fn selection_index_secondary() {
	assert!(!SelectionIndex::Default.is_secondary());
	assert!(!SelectionIndex::At(0).is_secondary());
	assert!(SelectionIndex::At(1).is_secondary());
	assert_eq!(SelectionIndex::Default.offset(), 0);
	assert_eq!(SelectionIndex::At(3).offset(), 3);
}

proptest! {
	#[test]
	fn canonical_form_preserves_caret(start in 0usize..500, end in 0usize..500) {
		let host = TextSelection::new(start, end);
		let acp = AcpSelection::from(host);
		prop_assert!(acp.start <= acp.end);
		prop_assert_eq!(acp.caret_offset(), Some(host.caret()));
	}

	#[test]
	fn host_pair_survives_canonicalization(start in 0usize..500, end in 0usize..500) {
		prop_assume!(start != end);
		let host = TextSelection::new(start, end);
		prop_assert_eq!(TextSelection::from(AcpSelection::from(host)), host);
	}
}
