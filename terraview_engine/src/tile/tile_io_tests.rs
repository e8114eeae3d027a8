use super::*;

fn buffer() -> Vec<u16> {
    (0..20).collect()
}

#[test]
fn test_empty_block() {
    let block: IoBlock<'_, u16> = IoBlock::empty();

    assert!(block.is_empty());
    assert_eq!(block.element_count(), 0);
    assert_eq!(block.stride(), 0);
    assert_eq!(block.lines().count(), 0);
    assert!(IoBlock::<u16>::default().is_empty());
}

#[test]
fn test_strided_lines() {
    let data = buffer();
    let block = IoBlock::new(&data[6..], 3, 5, 3);

    assert_eq!(block.stride(), 10);
    assert_eq!(block.data().len(), 13);
    let lines: Vec<&[u16]> = block.lines().collect();
    assert_eq!(lines, [&[6, 7, 8][..], &[11, 12, 13][..], &[16, 17, 18][..]]);
}

#[test]
fn test_contiguous_block() {
    let data = buffer();
    let block = IoBlock::new(&data, 4, 4, 5);

    assert_eq!(block.element_count(), 20);
    assert_eq!(block.as_ptr(), data.as_ptr());
    assert_eq!(block.line(4), Some(&[16, 17, 18, 19][..]));
}

#[test]
fn test_layout_past_buffer_is_empty() {
    let data = buffer();

    assert!(IoBlock::new(&data, 4, 6, 4).is_empty());
    assert!(IoBlock::new(&data[10..], 4, 4, 3).is_empty());
}

#[test]
fn test_degenerate_layouts_are_empty() {
    let data = buffer();

    assert!(IoBlock::new(&data, 0, 4, 2).is_empty());
    assert!(IoBlock::new(&data, 4, 4, 0).is_empty());
    assert!(IoBlock::new(&data, 4, 2, 2).is_empty());
}

#[test]
fn test_block_is_copy() {
    let data = buffer();
    let block = IoBlock::new(&data, 2, 2, 2);
    let copy = block;

    assert_eq!(block.line(1), copy.line(1));
}
