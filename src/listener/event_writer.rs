use serde_json::{json, Value};

use crate::listener::Listener;
use crate::model::*;
use crate::util::misc::*;

use crate::error;

// [EventWriter]
// 1局分のイベントをJSONファイルに書き出す
#[derive(Debug)]
pub struct EventWriter {
    dir: String,
    start_time: u64,
    round_index: usize,
    record: Vec<Value>,
}

impl EventWriter {
    pub fn new(dir: &str) -> Self {
        Self {
            dir: dir.to_string(),
            start_time: unixtime_now(),
            round_index: 0,
            record: vec![],
        }
    }

    pub fn file_path(&self) -> String {
        format!("{}/{}/{:03}.json", self.dir, self.start_time, self.round_index)
    }
}

impl Listener for EventWriter {
    fn notify_event(&mut self, _stg: &RoundState, event: &Event) {
        let mut write = false;
        match event {
            Event::New(_) => self.record.clear(),
            Event::Win(_) | Event::Draw(_) => write = true,
            _ => {}
        }

        self.record.push(json!(event));
        if write {
            let data = match serde_json::to_string_pretty(&self.record) {
                Ok(d) => d,
                Err(e) => {
                    error!("{}", e);
                    return;
                }
            };
            if let Err(e) = write_to_file(&self.file_path(), &data) {
                error!("{}", e);
            }
            self.record.clear();
            self.round_index += 1;
        }
    }
}
