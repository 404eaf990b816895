use net_core::{
    AvatarState, Message, MonsterDeath, PeerAvatarState, RoomOccupancy, WireDecode, WireEncode,
    WIRE_VERSION,
};

fn roundtrip<T: WireEncode + WireDecode + PartialEq + std::fmt::Debug>(msg: &T) {
    let mut buf = Vec::new();
    msg.encode(&mut buf);
    let mut inp = &buf[..];
    let got = T::decode(&mut inp).expect("decode");
    assert_eq!(&got, msg);
    assert!(inp.is_empty(), "decode consumed every byte");
}

#[test]
fn avatar_state_roundtrip() {
    roundtrip(&AvatarState {
        room: 43,
        x: -4,
        y: 120,
        facing_left: true,
        frame: 3,
    });
}

#[test]
fn peer_avatar_state_roundtrip() {
    roundtrip(&PeerAvatarState {
        peer_id: 0xDEAD_BEEF_0042,
        state: AvatarState {
            room: 0,
            x: 240,
            y: 0,
            facing_left: false,
            frame: 0,
        },
    });
}

#[test]
fn monster_death_roundtrip() {
    roundtrip(&MonsterDeath {
        room: 12,
        monster_id: 1203,
        died_at: 987_654_321,
    });
}

#[test]
fn room_occupancy_roundtrip() {
    let mut counts = [0u8; 48];
    counts[43] = 3;
    counts[0] = 1;
    roundtrip(&RoomOccupancy { counts });
}

#[test]
fn envelope_stream_drains_message_by_message() {
    let death = Message::Death(MonsterDeath {
        room: 7,
        monster_id: 701,
        died_at: 55_000,
    });
    let avatar = Message::Avatar(AvatarState {
        room: 7,
        x: 100,
        y: 50,
        facing_left: false,
        frame: 2,
    });
    let occupancy = Message::Occupancy(RoomOccupancy { counts: [1; 48] });

    // a tick's worth of outbound traffic, concatenated
    let mut buf = Vec::new();
    death.encode(&mut buf);
    avatar.encode(&mut buf);
    occupancy.encode(&mut buf);

    let mut inp = &buf[..];
    assert_eq!(Message::decode(&mut inp).expect("first"), death);
    assert_eq!(Message::decode(&mut inp).expect("second"), avatar);
    assert_eq!(Message::decode(&mut inp).expect("third"), occupancy);
    assert!(inp.is_empty(), "stream fully drained");
}

#[test]
fn envelopes_from_other_versions_or_unknown_tags_are_rejected() {
    let mut buf = Vec::new();
    Message::Death(MonsterDeath {
        room: 7,
        monster_id: 701,
        died_at: 55_000,
    })
    .encode(&mut buf);

    let mut wrong_version = buf.clone();
    wrong_version[0] = WIRE_VERSION + 1;
    assert!(Message::decode(&mut &wrong_version[..]).is_err());

    let mut bad_tag = buf;
    bad_tag[1] = 0xEE;
    assert!(Message::decode(&mut &bad_tag[..]).is_err());
}

#[test]
fn truncated_payloads_error_instead_of_panicking() {
    let mut buf = Vec::new();
    AvatarState {
        room: 1,
        x: 5,
        y: 6,
        facing_left: false,
        frame: 1,
    }
    .encode(&mut buf);
    for cut in 0..buf.len() {
        let mut inp = &buf[..cut];
        assert!(AvatarState::decode(&mut inp).is_err(), "cut at {cut}");
    }
}

#[test]
fn garbage_fields_are_rejected() {
    // facing byte outside 0/1
    let bytes = [43u8, 0, 0, 0, 0, 9, 0];
    let mut inp = &bytes[..];
    assert!(AvatarState::decode(&mut inp).is_err());
    // walk frame outside 0..=3
    let bytes = [43u8, 0, 0, 0, 0, 0, 9];
    let mut inp = &bytes[..];
    assert!(AvatarState::decode(&mut inp).is_err());
}
