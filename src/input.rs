use std::{
    collections::VecDeque,
    fs,
    io::{self, BufRead, BufReader, Read, Write},
    path::PathBuf,
    thread::{self, JoinHandle},
};

use crossbeam::channel::{Receiver, Sender};
use xz2::read::XzDecoder;

use crate::{
    error::{SimError, SimResult},
    Address,
};

pub const SENTINEL: i64 = -1;

/// Rejects negative values before they reach the hierarchy.
pub fn to_address(raw: i64) -> SimResult<Address> {
    Address::try_from(raw).map_err(|_| SimError::NegativeAddress(raw))
}

/// Addresses read from a file on a background thread and handed over in
/// batches. Reading stops at the first token that is not an integer.
pub struct AddressFile {
    pub rec: Receiver<Vec<i64>>,
    _thread: JoinHandle<()>,
}

impl AddressFile {
    pub fn read(path: PathBuf, addr_per_block: usize, blocks_per_queue: usize) -> io::Result<Self> {
        let file = fs::File::open(&path)?;
        let stream: Box<dyn Read + Send> = if path.extension().is_some_and(|ext| ext == "xz") {
            Box::new(XzDecoder::new(file))
        } else {
            Box::new(file)
        };
        let (sender, receiver) = crossbeam::channel::bounded(blocks_per_queue);
        let block = addr_per_block.max(1);

        let t = thread::spawn(move || AddressFile::run_thread(stream, block, sender));

        Ok(AddressFile {
            rec: receiver,
            _thread: t,
        })
    }

    fn run_thread(stream: Box<dyn Read + Send>, addr_per_block: usize, queue: Sender<Vec<i64>>) {
        let reader = BufReader::new(stream);
        let mut buffer = Vec::with_capacity(addr_per_block);
        'lines: for line in reader.lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    log::warn!("stopped reading addresses: {}", err);
                    break;
                }
            };
            for token in line.split_whitespace() {
                match token.parse::<i64>() {
                    Ok(addr) => buffer.push(addr),
                    Err(_) => {
                        log::warn!("stopped reading addresses at non-integer token {:?}", token);
                        break 'lines;
                    }
                }
                if buffer.len() == addr_per_block {
                    let full = std::mem::replace(&mut buffer, Vec::with_capacity(addr_per_block));
                    if queue.send(full).is_err() {
                        return;
                    }
                }
            }
        }
        if !buffer.is_empty() {
            let _ = queue.send(buffer);
        }
    }

    /// Every address in file order.
    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.rec.iter().flatten()
    }
}

/// Prompts for one address at a time until the sentinel or end of input.
pub struct Interactive<R, W> {
    input: R,
    prompt_out: W,
    pending: VecDeque<String>,
}

impl<R: BufRead, W: Write> Interactive<R, W> {
    pub fn new(input: R, prompt_out: W) -> Self {
        Interactive {
            input,
            prompt_out,
            pending: VecDeque::new(),
        }
    }

    pub fn next_address(&mut self) -> io::Result<Option<i64>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                match token.parse::<i64>() {
                    Ok(SENTINEL) => return Ok(None),
                    Ok(addr) => return Ok(Some(addr)),
                    Err(_) => {
                        log::warn!("ignoring non-integer input {:?}", token);
                        continue;
                    }
                }
            }

            write!(self.prompt_out, "\nEnter a memory address (or -1 to quit): ")?;
            self.prompt_out.flush()?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
    }
}
