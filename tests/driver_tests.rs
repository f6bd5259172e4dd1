use battleship_rules::driver::{self, ChannelSensor, LineSensor, RecordingPresenter};
use battleship_rules::{
    BoardPosition, Command, ControlSet, Event, Location, Placement, PlayerId, Session, Settings,
};

fn micro_session() -> Session {
    Session::new(Settings::single_type(2, 1, 1, Placement::Origin)).unwrap()
}

fn at(row: usize, col: usize, location: Location) -> Event {
    Event::Move {
        to: BoardPosition::new(row, col),
        location,
    }
}

#[tokio::test]
async fn test_channel_sensor_plays_micro_game() -> anyhow::Result<()> {
    let (tx, mut sensor) = ChannelSensor::pair();
    let script = [
        Event::Select,
        at(0, 0, Location::ShipGrid),
        at(0, 0, Location::ShipGrid),
        Event::Unselect,
        Event::Select,
        at(1, 1, Location::ShipGrid),
        Event::Unselect,
        // Rotation is disarmed in battle; the sensor never forwards this.
        Event::Rotate,
        Event::Select,
        at(1, 1, Location::PinGrid),
        Event::Unselect,
        // Arrives after the game ended and is never read.
        Event::Select,
    ];
    for event in script {
        tx.send(event)?;
    }
    drop(tx);

    let mut session = micro_session();
    let mut presenter = RecordingPresenter::default();
    let winner = driver::run(&mut session, &mut sensor, &mut presenter).await?;

    assert_eq!(winner, Some(PlayerId::P1));
    assert_eq!(
        presenter.commands,
        vec![
            Command::MakeShip { size: 1 },
            Command::SelectShip,
            Command::MoveShip {
                to: BoardPosition::new(0, 0)
            },
            Command::SettleShip,
            Command::ChangePlayer,
            Command::MakeShip { size: 1 },
            Command::SelectShip,
            Command::MoveShip {
                to: BoardPosition::new(1, 1)
            },
            Command::SettleShip,
            Command::SelectPin,
            Command::MovePin {
                to: BoardPosition::new(1, 1)
            },
        ]
    );
    assert_eq!(sensor.armed(), ControlSet::empty());
    Ok(())
}

#[tokio::test]
async fn test_line_sensor_skips_comments_and_bad_lines() -> anyhow::Result<()> {
    let script = b"# place P1\nselect\nmove ship 0 0\nfire!\n\nunselect\nselect\nmove ship 0 1\nunselect\n" as &[u8];
    let mut sensor = LineSensor::new(script);
    let mut session = micro_session();
    let mut presenter = RecordingPresenter::default();

    let winner = driver::run(&mut session, &mut sensor, &mut presenter).await?;
    assert_eq!(winner, None);
    assert_eq!(
        presenter
            .commands
            .iter()
            .filter(|c| **c == Command::SettleShip)
            .count(),
        2
    );
    assert_eq!(
        session.game().player(PlayerId::P2).ships()[0].anchor(),
        BoardPosition::new(0, 1)
    );
    Ok(())
}
