use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::iter::Enumerate;
use std::path::Path;

use anyhow::{anyhow, bail, Context};
use log::info;
use ls8_lib::memory::MEMORY_SIZE;
use pest::Parser;
use pest_derive::Parser;

use crate::AppResult;

#[derive(Parser)]
#[grammar = "../program.pest"]
struct PestParser;

pub struct ProgramLineParser;

impl ProgramLineParser {
    /// Returns the byte held by the line, `None` for blank or comment lines.
    pub fn from(line: &str) -> AppResult<Option<u8>> {
        let line = line.trim();

        if line.is_empty() {
            return Ok(None);
        }

        let pair = PestParser::parse(Rule::sentence, line)?
            .next()
            .ok_or_else(|| anyhow!("There shall be one sentence per line."))?;

        match pair.into_inner().find(|pair| pair.as_rule() == Rule::byte) {
            Some(byte) => Ok(Some(u8::from_str_radix(byte.as_str(), 2)?)),
            None => Ok(None),
        }
    }
}

#[derive(Debug)]
struct ByteIterator<B>
where
    B: BufRead,
{
    iterator: Enumerate<Lines<B>>,
}

impl<B> ByteIterator<B>
where
    B: BufRead,
{
    pub fn new(iterator: Lines<B>) -> Self {
        Self {
            iterator: iterator.enumerate(),
        }
    }
}

impl<B> Iterator for ByteIterator<B>
where
    B: BufRead,
{
    type Item = AppResult<Option<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.iterator.next().map(|(index, result)| {
            result.map_err(|e| anyhow!(e)).and_then(|line| {
                ProgramLineParser::from(&line)
                    .with_context(|| format!("line {}: invalid program line '{}'", index + 1, line.trim()))
            })
        })
    }
}

pub struct ProgramLoader;

impl ProgramLoader {
    pub fn from_reader<B: BufRead>(buffer: B) -> AppResult<Vec<u8>> {
        let mut program: Vec<u8> = Vec::new();

        for result in ByteIterator::new(buffer.lines()) {
            if let Some(byte) = result? {
                program.push(byte);
            }
        }

        if program.len() > MEMORY_SIZE {
            bail!(
                "program is {} bytes long, memory only holds {} bytes",
                program.len(),
                MEMORY_SIZE
            );
        }
        info!("{} bytes of program parsed", program.len());

        Ok(program)
    }

    pub fn from_file(path: &Path) -> AppResult<Vec<u8>> {
        let file = File::open(path)
            .with_context(|| format!("could not open program file '{}'", path.display()))?;

        ProgramLoader::from_reader(BufReader::new(file))
    }
}
