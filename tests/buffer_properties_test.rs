mod test_signals;

use pcmbuf::SampleBuffer;
use pcmbuf::constants::BYTES_PER_SAMPLE;

#[test]
fn test_set_samples_reports_length_and_bytes() {
    let mut buffer = SampleBuffer::new();
    for n in [0, 1, 7, 1024, 3, 0, 4096] {
        buffer.set_samples(n);
        assert_eq!(buffer.samples(), n);
        assert_eq!(buffer.bytes(), n * BYTES_PER_SAMPLE);
        assert!(buffer.capacity() >= n);
    }
}

#[test]
fn test_copy_reads_back_exactly() {
    let source = test_signals::ramp(300);
    let mut buffer = SampleBuffer::new();
    buffer.copy(&source);

    assert_eq!(buffer.samples(), 300);
    assert_eq!(&buffer.buffer_mut()[..300], source.as_slice());
}

#[test]
fn test_copy_is_idempotent() {
    let source = test_signals::sine(440.0, 44100, 512);
    let mut buffer = SampleBuffer::new();

    buffer.copy(&source);
    let first = buffer.as_slice().to_vec();
    buffer.copy(&source);

    assert_eq!(buffer.as_slice(), first.as_slice());
    assert_eq!(buffer.samples(), 512);
}

#[test]
fn test_append_concatenates() {
    let a = test_signals::ramp(10);
    let b: Vec<f32> = (100..125).map(|i| i as f32).collect();

    let mut buffer = SampleBuffer::new();
    buffer.copy(&a);
    buffer.append(&b);

    let expected: Vec<f32> = a.iter().chain(b.iter()).copied().collect();
    assert_eq!(buffer.as_slice(), expected.as_slice());
    assert_eq!(buffer.samples(), 35);
}

#[test]
fn test_append_into_spare_capacity_concatenates() {
    let mut buffer = SampleBuffer::new();
    buffer.set_samples(64);
    buffer.copy(&[1.0, 2.0, 3.0]);
    buffer.append(&[4.0, 5.0]);
    buffer.append(&[6.0]);

    assert_eq!(buffer.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    assert_eq!(buffer.capacity(), 64);
}

#[test]
fn test_capacity_never_decreases() {
    // Deterministic pseudo-random operation mix
    let mut state: u32 = 12345;
    let mut next = move || {
        state = state.wrapping_mul(1_103_515_245).wrapping_add(12345);
        (state >> 16) as usize
    };

    let mut buffer = SampleBuffer::new();
    let mut last_capacity = buffer.capacity();

    for _ in 0..500 {
        let len = next() % 300;
        match next() % 4 {
            0 => buffer.set_samples(len),
            1 => buffer.copy(&vec![0.25; len]),
            2 => buffer.append(&vec![0.5; len % 40]),
            _ => buffer.clear(),
        }
        assert!(buffer.capacity() >= last_capacity);
        assert!(buffer.capacity() >= buffer.samples());
        last_capacity = buffer.capacity();
    }
}

#[test]
fn test_copy_format_leaves_content_alone() {
    let mut other = SampleBuffer::new();
    other.set_channels(6).unwrap();
    other.set_sample_rate(96000).unwrap();

    let mut buffer = SampleBuffer::new();
    buffer.copy(&test_signals::ramp(12));
    buffer.copy_format(&other);

    assert_eq!(buffer.channels(), 6);
    assert_eq!(buffer.sample_rate(), 96000);
    assert_eq!(buffer.samples(), 12);
    assert_eq!(buffer.as_slice(), test_signals::ramp(12).as_slice());
}

#[test]
fn test_self_copy_matches_plain_copy() {
    let source = test_signals::ramp(50);

    let mut overlapping = SampleBuffer::new();
    overlapping.copy(&source);
    overlapping.copy_within(0..50).unwrap();

    let mut plain = SampleBuffer::new();
    plain.copy(&source);
    plain.copy(&source);

    assert_eq!(overlapping.as_slice(), plain.as_slice());

    // Shifting down by one overlaps every element but the first
    overlapping.copy_within(1..50).unwrap();
    assert_eq!(overlapping.as_slice(), &source[1..]);
}

#[test]
fn test_direct_writes_through_backing_store() {
    let mut buffer = SampleBuffer::new();
    buffer.set_samples(8);
    for (i, slot) in buffer.buffer_mut().iter_mut().enumerate() {
        *slot = i as f32 * 0.5;
    }
    assert_eq!(buffer.as_slice()[7], 3.5);
}

#[test]
fn test_position_is_passthrough() {
    let mut buffer = SampleBuffer::new();
    buffer.set_position(-3.75);
    assert_eq!(buffer.position(), -3.75);
    buffer.copy(&[1.0]);
    assert_eq!(buffer.position(), -3.75);
}
