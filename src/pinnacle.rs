//! Cirque Pinnacle absolute reports.
//!
//! In absolute mode the Pinnacle reports a position, a "z" value that is
//! roughly the capacitance of whatever is touching it, and the state of its
//! button inputs.  A z of zero means nothing is on the pad.

/// A single absolute-mode report, as read from the sensor.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default)]
pub struct AbsoluteReport {
    pub x: u16,
    pub y: u16,
    pub z: u8,
    pub buttons: u8,
}

impl AbsoluteReport {
    pub fn is_touching(&self) -> bool {
        self.z != 0
    }

    /// Decode the six data bytes read starting at the PACKET_BYTE_0
    /// register.
    pub fn from_registers(data: &[u8; 6]) -> AbsoluteReport {
        AbsoluteReport {
            buttons: data[0] & 0x3f,
            x: data[2] as u16 | ((data[4] as u16 & 0x0f) << 8),
            y: data[3] as u16 | ((data[4] as u16 & 0xf0) << 4),
            z: data[5] & 0x3f,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AbsoluteReport;

    #[test]
    fn decode_registers() {
        let report = AbsoluteReport::from_registers(&[0x01, 0x00, 0x34, 0x78, 0x52, 0x1f]);
        assert_eq!(report.x, 0x234);
        assert_eq!(report.y, 0x578);
        assert_eq!(report.z, 0x1f);
        assert_eq!(report.buttons, 0x01);
        assert!(report.is_touching());

        let report = AbsoluteReport::from_registers(&[0, 0, 0, 0, 0, 0]);
        assert!(!report.is_touching());
    }
}
