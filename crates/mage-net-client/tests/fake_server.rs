//! End-to-end tests against a scripted server over an in-memory stream

use mage_net_bridge::{
    AsyncReader, AsyncWriter, ClientMessage, FrameReader, FrameWriter, ServerMessage,
    WriteListener, deserialize, serialize,
};
use mage_net_client::{
    BridgeState, ClientConfig, Connection, IgnorePushes, NotificationHandler, SeatRequest,
};
use mage_net_core::{
    ChatId, DeckCardLists, MageNetError, Result, RoomId, RoomView, TableId, UserView,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, mpsc};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tokio::io::DuplexStream;
use uuid::Uuid;

const BOUND: Duration = Duration::from_secs(5);

/// What the scripted server does after reading one request
enum Reply {
    Unit(ServerMessage),
    Raw(&'static [u8]),
    Hangup,
}

/// Serve one client on the other end of a duplex pipe
///
/// Returns the client's end and a thread that yields every request received.
fn start_server<F>(mut respond: F) -> (DuplexStream, JoinHandle<Vec<ClientMessage>>)
where
    F: FnMut(&ClientMessage) -> Vec<Reply> + Send + 'static,
{
    let (client_end, server_end) = tokio::io::duplex(64 * 1024);

    let server = thread::spawn(move || {
        tokio_test::block_on(async move {
            let (read_half, write_half) = tokio::io::split(server_end);
            let mut reader = FrameReader::new(read_half);
            let mut writer = FrameWriter::new(write_half);
            let mut received = Vec::new();

            while let Ok(data) = reader.read_message().await {
                let request: ClientMessage = deserialize(&data).unwrap();
                let replies = respond(&request);
                received.push(request);

                for reply in replies {
                    match reply {
                        Reply::Unit(unit) => {
                            writer.write_message(&serialize(&unit).unwrap()).await.unwrap();
                        }
                        Reply::Raw(bytes) => writer.write_message(bytes).await.unwrap(),
                        Reply::Hangup => return received,
                    }
                }
            }
            received
        })
    });

    (client_end, server)
}

fn room(room_id: RoomId) -> RoomView {
    RoomView {
        room_id,
        users: vec![UserView {
            user_name: "alice".into(),
            info: String::new(),
            in_game: false,
        }],
        tables: vec![],
    }
}

#[derive(Default)]
struct Pushes {
    joined: Mutex<Vec<TableId>>,
    informs: Mutex<Vec<String>>,
    disconnects: AtomicUsize,
}

impl NotificationHandler for Pushes {
    fn on_joined_table(&self, _room_id: RoomId, table_id: TableId, _is_tournament: bool) {
        self.joined.lock().unwrap().push(table_id);
    }

    fn on_inform(&self, message: String) {
        self.informs.lock().unwrap().push(message);
    }

    fn on_disconnected(&self, _reason: &MageNetError) {
        self.disconnects.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
struct Writes(Mutex<Vec<(&'static str, bool)>>);

impl WriteListener for Writes {
    fn on_write(&self, kind: &'static str, result: &Result<()>) {
        self.0.lock().unwrap().push((kind, result.is_ok()));
    }
}

#[test]
fn test_blocking_calls_round_trip() {
    let (stream, server) = start_server(|request| match request {
        ClientMessage::ServerMessages => vec![Reply::Unit(ServerMessage::StringList {
            items: vec!["Welcome".into(), "Be nice".into()],
        })],
        ClientMessage::GetRoom { room_id } => vec![Reply::Unit(ServerMessage::RoomView {
            view: room(*room_id),
        })],
        _ => vec![],
    });
    let mut connection =
        Connection::over_stream(stream, ClientConfig::default(), Arc::new(IgnorePushes)).unwrap();
    let client = connection.client();
    let room_id = Uuid::new_v4();

    assert_eq!(client.state(), BridgeState::Active);
    assert_eq!(client.server_messages().unwrap(), vec!["Welcome", "Be nice"]);
    let view = client.get_room(room_id).unwrap();
    assert_eq!(view.room_id, room_id);
    assert_eq!(view.users[0].user_name, "alice");

    connection.close();
    let received = server.join().unwrap();
    assert_eq!(
        received,
        vec![
            ClientMessage::ServerMessages,
            ClientMessage::GetRoom { room_id }
        ]
    );
}

#[test]
fn test_pushes_are_delivered_in_order_with_replies() {
    let (stream, _server) = start_server(|request| match request {
        ClientMessage::JoinTable {
            room_id, table_id, ..
        } => vec![
            Reply::Unit(ServerMessage::JoinedTable {
                room_id: *room_id,
                table_id: *table_id,
                is_tournament: false,
            }),
            Reply::Unit(ServerMessage::Boolean { value: true }),
        ],
        _ => vec![],
    });
    let pushes = Arc::new(Pushes::default());
    let connection =
        Connection::over_stream(stream, ClientConfig::default(), pushes.clone()).unwrap();
    let table_id = Uuid::new_v4();

    let seated = connection
        .client()
        .join_table(
            Uuid::new_v4(),
            table_id,
            SeatRequest::human("alice", DeckCardLists::default()),
        )
        .unwrap();

    assert!(seated);
    // The push preceded the reply on the wire, so it has already been handled
    assert_eq!(*pushes.joined.lock().unwrap(), vec![table_id]);
}

#[test]
fn test_unclassifiable_frames_are_skipped() {
    let (stream, _server) = start_server(|request| match request {
        ClientMessage::ServerMessages => vec![
            Reply::Raw(br#"{"Type":"SomethingNew","Value":1}"#),
            Reply::Raw(b"not json at all"),
            Reply::Unit(ServerMessage::Inform {
                message: "maintenance at noon".into(),
            }),
            Reply::Unit(ServerMessage::StringList {
                items: vec!["still here".into()],
            }),
        ],
        _ => vec![],
    });
    let pushes = Arc::new(Pushes::default());
    let connection =
        Connection::over_stream(stream, ClientConfig::default(), pushes.clone()).unwrap();

    assert_eq!(
        connection.client().server_messages().unwrap(),
        vec!["still here"]
    );
    assert_eq!(
        *pushes.informs.lock().unwrap(),
        vec!["maintenance at noon".to_string()]
    );
}

#[test]
fn test_server_hangup_releases_blocked_call() {
    let (stream, _server) = start_server(|request| match request {
        ClientMessage::GetRoom { .. } => vec![Reply::Hangup],
        _ => vec![],
    });
    let pushes = Arc::new(Pushes::default());
    let connection =
        Connection::over_stream(stream, ClientConfig::default(), pushes.clone()).unwrap();
    let client = connection.client();

    assert!(matches!(
        client.get_room(Uuid::new_v4()),
        Err(MageNetError::ConnectionLost)
    ));
    assert_eq!(client.state(), BridgeState::Closed);
    assert!(matches!(
        client.server_messages(),
        Err(MageNetError::ConnectionLost)
    ));

    drop(connection);
    assert_eq!(pushes.disconnects.load(Ordering::SeqCst), 1);
}

#[test]
fn test_close_releases_blocked_call() {
    let (seen_tx, seen_rx) = mpsc::channel();
    let (stream, server) = start_server(move |request| {
        let _ = seen_tx.send(request.kind());
        vec![]
    });
    let mut connection =
        Connection::over_stream(stream, ClientConfig::default(), Arc::new(IgnorePushes)).unwrap();

    let client = connection.client();
    let (done_tx, done_rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = done_tx.send(client.chat_room_id(Uuid::new_v4()));
    });
    assert_eq!(seen_rx.recv_timeout(BOUND).unwrap(), "ChatRoomId");

    connection.close();

    assert!(matches!(
        done_rx.recv_timeout(BOUND).unwrap(),
        Err(MageNetError::ConnectionLost)
    ));
    // Our end of the pipe is gone, so the server sees end of stream
    assert_eq!(server.join().unwrap().len(), 1);
}

#[test]
fn test_response_timeout_from_config() {
    let (stream, _server) = start_server(|_| vec![]);
    let config = ClientConfig::default().with_response_timeout(Duration::from_millis(50));
    let connection = Connection::over_stream(stream, config, Arc::new(IgnorePushes)).unwrap();

    assert!(matches!(
        connection.client().join_game(Uuid::new_v4()),
        Err(MageNetError::Timeout(_))
    ));
    assert_eq!(connection.client().state(), BridgeState::Active);
}

#[test]
fn test_one_way_calls_reach_server_in_order() {
    let (stream, server) = start_server(|request| match request {
        ClientMessage::ServerMessages => vec![Reply::Unit(ServerMessage::StringList {
            items: vec![],
        })],
        _ => vec![],
    });
    let writes = Arc::new(Writes::default());
    let mut connection = Connection::over_stream_with_listener(
        stream,
        ClientConfig::default(),
        Arc::new(IgnorePushes),
        writes.clone(),
    )
    .unwrap();
    let client = connection.client();
    let chat_id: ChatId = Uuid::new_v4();

    client.join_chat(chat_id).unwrap();
    client.send_message(chat_id, "hello").unwrap();
    client.leave_chat(chat_id).unwrap();
    // A blocking call behind them proves they were all written
    client.server_messages().unwrap();

    assert_eq!(
        *writes.0.lock().unwrap(),
        vec![
            ("JoinChat", true),
            ("ChatMessage", true),
            ("LeaveChat", true),
            ("ServerMessages", true),
        ]
    );

    connection.close();
    let received = server.join().unwrap();
    assert_eq!(received.len(), 4);
    assert_eq!(received[0], ClientMessage::JoinChat { chat_id });
    assert_eq!(
        received[1],
        ClientMessage::ChatMessage {
            chat_id,
            message: "hello".into()
        }
    );
}

#[test]
fn test_connect_failure_is_returned() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let config = ClientConfig::from_address(&format!("127.0.0.1:{}", port))
        .unwrap()
        .with_connect_timeout(Duration::from_secs(2));

    let result = Connection::connect_tcp(config, Arc::new(IgnorePushes));

    assert!(matches!(result, Err(MageNetError::Io(_))));
}

#[cfg(unix)]
#[test]
fn test_unix_socket_round_trip() {
    use std::io::{Read, Write};
    use std::os::unix::net::UnixListener;

    let path = std::env::temp_dir().join(format!("mage-net-{}.sock", Uuid::new_v4()));
    let listener = UnixListener::bind(&path).unwrap();
    let server = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut len = [0u8; 4];
        stream.read_exact(&mut len).unwrap();
        let mut body = vec![0u8; u32::from_le_bytes(len) as usize];
        stream.read_exact(&mut body).unwrap();
        let request: ClientMessage = deserialize(&body).unwrap();

        let reply = serialize(&ServerMessage::StringList {
            items: vec!["local".into()],
        })
        .unwrap();
        stream.write_all(&(reply.len() as u32).to_le_bytes()).unwrap();
        stream.write_all(&reply).unwrap();
        request
    });

    let mut connection =
        Connection::connect_unix(&path, ClientConfig::default(), Arc::new(IgnorePushes)).unwrap();

    assert_eq!(connection.client().server_messages().unwrap(), vec!["local"]);
    assert_eq!(server.join().unwrap(), ClientMessage::ServerMessages);

    connection.close();
    let _ = std::fs::remove_file(&path);
}
