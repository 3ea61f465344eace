use mi23_core::{
    ByteEvent, ByteSource, EventSource, Frame, FrameSynchronizer, Mode, ReadingStream, Unit,
    UnitPrefix, decode,
};
use time::{Duration, OffsetDateTime};

fn wire(nibbles: [u8; 14]) -> [u8; 14] {
    Frame::from_nibbles(OffsetDateTime::UNIX_EPOCH, nibbles).to_wire()
}

fn events(bytes: &[u8]) -> Vec<ByteEvent> {
    bytes
        .iter()
        .enumerate()
        .map(|(i, &byte)| ByteEvent {
            ts: OffsetDateTime::UNIX_EPOCH + Duration::milliseconds(i as i64 * 4),
            byte,
        })
        .collect()
}

#[test]
fn embedded_frame_is_found_at_every_offset() {
    let payload = [0xa, 0, 0, 0, 5, 0xd, 0xb, 3, 0xe, 0, 8, 0, 4, 0];
    let noise = [0x00, 0x07, 0x3c, 0xf1, 0x0e, 0x2b, 0x00, 0x9a, 0x01];

    for lead in 0..noise.len() {
        let mut bytes = noise[..lead].to_vec();
        bytes.extend(wire(payload));
        bytes.extend(&noise[..noise.len() - lead]);

        let mut stream = ReadingStream::new(EventSource::new(events(&bytes)));
        let reading = stream.next_reading().unwrap().expect("frame found");
        assert_eq!(
            reading.timestamp,
            OffsetDateTime::UNIX_EPOCH + Duration::milliseconds(lead as i64 * 4)
        );
        assert_eq!(reading.digits, " 1.25");
        assert_eq!(reading.unit_prefix, Some(UnitPrefix::Milli));
        assert_eq!(reading.unit, Some(Unit::Volt));
        assert_eq!(reading.options, vec![Mode::Ac, Mode::AutoRange]);
        assert!(stream.next_reading().unwrap().is_none(), "lead {lead}");
    }
}

#[test]
fn long_noise_keeps_window_bounded() {
    let noise: Vec<u8> = (0..10_000u32).map(|i| (i * 7 % 16) as u8).collect();
    let mut sync = FrameSynchronizer::new();
    for event in events(&noise) {
        assert!(sync.push(event).is_none());
        assert!(sync.pending() <= 14);
    }
}

#[test]
fn synchronizer_and_decode_compose() {
    let mut source = EventSource::new(events(&wire([
        0x8, 0x7, 0xd, 0x7, 0xd, 0x7, 0xd, 0x7, 0xd, 0, 0, 0x2, 0, 0,
    ])));
    let mut sync = FrameSynchronizer::new();
    let mut frames = Vec::new();
    while let Some(event) = source.next_byte().unwrap() {
        frames.extend(sync.push(event));
    }
    assert_eq!(frames.len(), 1);
    let reading = decode(&frames[0]);
    assert_eq!(reading.digits, "0000");
    assert_eq!(reading.options, vec![Mode::Ac, Mode::Relative]);
}
