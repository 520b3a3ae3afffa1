// Copyright (C) 2026 Michael Wilson <mike@mdwn.dev>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//
use std::{error::Error, fmt, net::UdpSocket};

use tracing::debug;

use super::Message;

/// A sink that sends each control message as one rosc-encoded UDP datagram.
pub struct Sink {
    socket: UdpSocket,
    destination: String,
}

impl Sink {
    /// Binds an ephemeral local socket and connects it to the destination.
    pub fn connect(host: &str, port: u16) -> Result<Sink, Box<dyn Error>> {
        let destination = format!("{}:{}", host, port);
        let socket = UdpSocket::bind("0.0.0.0:0")?;
        socket.connect(&destination)?;

        Ok(Sink {
            socket,
            destination,
        })
    }
}

impl super::Sink for Sink {
    fn send(&self, message: &Message) -> Result<(), Box<dyn Error>> {
        let buf = rosc::encoder::encode(&message.to_packet())?;
        self.socket.send(&buf)?;
        debug!(destination = self.destination, %message, "Sent OSC message.");

        Ok(())
    }
}

impl fmt::Display for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (UDP)", self.destination)
    }
}

#[cfg(test)]
mod test {
    use std::{error::Error, net::UdpSocket, time::Duration};

    use rosc::OscPacket;

    use crate::osc::{Message, Sink as _};

    #[test]
    fn test_send_encodes_and_delivers() -> Result<(), Box<dyn Error>> {
        let receiver = UdpSocket::bind("127.0.0.1:0")?;
        receiver.set_read_timeout(Some(Duration::from_secs(5)))?;
        let port = receiver.local_addr()?.port();

        let sink = super::Sink::connect("127.0.0.1", port)?;
        sink.send(&Message::Note {
            note: 64,
            velocity: 90,
        })?;

        let mut buf = [0u8; rosc::decoder::MTU];
        let (len, _) = receiver.recv_from(&mut buf)?;
        let (_, packet) = rosc::decoder::decode_udp(&buf[..len])?;

        match packet {
            OscPacket::Message(message) => {
                assert_eq!("/control/note", message.addr);
                assert_eq!(3, message.args.len());
            }
            OscPacket::Bundle(_) => return Err("expected a message packet".into()),
        }

        Ok(())
    }
}
