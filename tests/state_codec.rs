use modbase::{
    block::{BlockState, Property, PropertyError, PropertySet, PropertyValue, StateCodec},
    util::UnlocalizedName,
    world::Direction,
};

fn property_set(name: &str, properties: &[Property]) -> Result<PropertySet, PropertyError> {
    let mut set = PropertySet::new(UnlocalizedName::new("codec_test", name));
    for property in properties {
        set.add(property.clone())?;
    }
    Ok(set)
}

fn layouts() -> Vec<StateCodec> {
    let layouts = vec![
        vec![],
        vec![Property::boolean("lit")],
        vec![Property::int_range("power", 0 ..= 15)],
        vec![
            Property::directions("facing", &Direction::HORIZONTALS),
            Property::boolean("lit"),
        ],
        vec![
            Property::named("mode", &["off", "idle", "busy"]),
            Property::int_range("level", 1 ..= 5),
        ],
        vec![
            Property::directions("facing", &[Direction::Up, Direction::Down]),
            Property::boolean("open"),
            Property::named("hinge", &["left", "right"]),
            Property::boolean("powered"),
        ],
    ];

    layouts
        .iter()
        .enumerate()
        .map(|(index, properties)| {
            let name = format!("layout_{}", index);
            StateCodec::new(property_set(&name, properties).unwrap()).unwrap()
        })
        .collect()
}

#[test]
fn every_state_round_trips() {
    for codec in layouts() {
        let states = codec.states().collect::<Vec<_>>();
        assert_eq!(states.len(), codec.combinations());

        for (meta, state) in states.iter().enumerate() {
            assert_eq!(codec.encode(state) as usize, meta, "{}", state);
            assert_eq!(&codec.decode(codec.encode(state)), state);
        }

        // Distinct codes give distinct states
        for (i, a) in states.iter().enumerate() {
            for b in &states[i + 1 ..] {
                assert_ne!(a, b);
            }
        }
    }
}

#[test]
fn decode_is_total() {
    for codec in layouts() {
        for meta in 0 ..= 15u8 {
            let state = codec.decode(meta);
            assert_eq!(state.len(), codec.properties().len());

            for property in codec.properties().iter() {
                let value = state.get(property.name()).unwrap();
                assert!(property.contains(value), "{} is not a value of {}", value, property);
            }

            let encoded = codec.encode(&state);
            assert!(encoded <= 15);
            if codec.is_reachable(meta) {
                assert_eq!(encoded, meta);
            } else {
                assert!((encoded as usize) < codec.combinations());
            }
        }
    }
}

#[test]
fn unreachable_codes_wrap() {
    let codec = StateCodec::new(
        property_set("wrap", &[
            Property::named("mode", &["off", "idle", "busy"]),
            Property::int_range("level", 1 ..= 5),
        ])
        .unwrap(),
    )
    .unwrap();
    assert_eq!(codec.combinations(), 15);

    // 15 = 0 * 3 + 15 % 3 for mode, then 15 / 3 = 5 wraps to the first level
    let state = codec.decode(15);
    assert_eq!(state.get("mode"), Some(&PropertyValue::from("off")));
    assert_eq!(state.get("level"), Some(&PropertyValue::Int(1)));
    assert_eq!(codec.encode(&state), 0);
}

#[test]
fn worked_example() {
    let codec = StateCodec::new(
        property_set("lamp", &[
            Property::directions("facing", &Direction::HORIZONTALS),
            Property::boolean("lit"),
        ])
        .unwrap(),
    )
    .unwrap();

    let state = codec
        .builder()
        .with_property("facing", Direction::HORIZONTALS[2])
        .and_then(|builder| builder.with_property("lit", true))
        .map_err(|(_, error)| error)
        .unwrap()
        .build();

    assert_eq!(codec.encode(&state), 6);
    assert_eq!(codec.decode(6), state);
    assert_eq!(state.to_string(), "[facing=north,lit=true]");
}

#[test]
fn foreign_states_encode_leniently() {
    let codec = StateCodec::new(
        property_set("lenient", &[
            Property::int_range("power", 0 ..= 3),
            Property::boolean("lit"),
        ])
        .unwrap(),
    )
    .unwrap();

    assert_eq!(codec.encode(&BlockState::default()), 0);

    let lit = codec.default_state().clone().with("lit", true);
    assert_eq!(codec.encode(&lit), 4);
    assert_eq!(codec.encode(&lit.clone().with("power", 42)), 4);

    // Properties the codec does not know are ignored entirely
    let mut stranger = codec.default_state().clone();
    assert!(!stranger.set("color", "red"));
    assert_eq!(codec.encode(&stranger), 0);
}

#[test]
fn capacity_limits() {
    let error = property_set("five", &[
        Property::boolean("a"),
        Property::boolean("b"),
        Property::boolean("c"),
        Property::boolean("d"),
        Property::boolean("e"),
    ])
    .unwrap_err();
    assert_eq!(
        error,
        PropertyError::TooManyProperties {
            block: UnlocalizedName::new("codec_test", "five"),
            property: "e".to_owned(),
        }
    );
    assert!(error.is_capacity());

    let set = property_set("dense", &[
        Property::int_range("a", 0 ..= 2),
        Property::int_range("b", 0 ..= 5),
    ])
    .unwrap();
    let error = StateCodec::new(set).unwrap_err();
    assert_eq!(
        error,
        PropertyError::TooManyCombinations {
            block: UnlocalizedName::new("codec_test", "dense"),
            combinations: 18,
        }
    );
    assert_eq!(
        error.to_string(),
        "Block codec_test:dense has 18 combinations of property values (16 allowed)"
    );

    let set = property_set("exact", &[
        Property::int_range("a", 0 ..= 3),
        Property::int_range("b", 0 ..= 3),
    ])
    .unwrap();
    assert_eq!(StateCodec::new(set).unwrap().combinations(), 16);
}
