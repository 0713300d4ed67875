use crate::cli::PrintableMessage;
use crate::config::CompileSettings;
use crate::graphql::schema::Schema;
use crate::work::Work;
use crossbeam_channel as channel;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug)]
enum Message {
    Work(Work),
    Quit,
}

struct Worker {
    threads: usize,
    is_waiting: bool,
    is_quitting: bool,
    num_waiting: Arc<AtomicUsize>,
    num_quitting: Arc<AtomicUsize>,
    tx: channel::Sender<Message>,
    rx: channel::Receiver<Message>,
    schema: Arc<Schema>,
    settings: Arc<CompileSettings>,
    root_dir: PathBuf,
    messages: Vec<PrintableMessage>,
}

impl Worker {
    fn run(mut self) -> Vec<PrintableMessage> {
        while let Some(work) = self.pop_work() {
            let (more_work, mut messages) = work.run(&self.schema, &self.settings, &self.root_dir);
            for new_work in more_work {
                self.tx.send(Message::Work(new_work)).unwrap();
            }
            self.messages.append(&mut messages);
        }
        self.messages
    }

    fn pop_work(&mut self) -> Option<Work> {
        loop {
            match self.rx.try_recv() {
                Ok(Message::Work(work)) => {
                    self.set_waiting(false);
                    self.set_quitting(false);
                    return Some(work);
                }
                Ok(Message::Quit) => {
                    self.set_waiting(true);
                    self.set_quitting(true);
                    loop {
                        let nwait = self.num_waiting();
                        let nquit = self.num_quitting();
                        // If the number of waiting workers dropped, then abort our attempt to quit.
                        // Sometimes work will come back.
                        if nwait < self.threads {
                            break;
                        }
                        // If all workers are in this quit loop, then we can stop.
                        if nquit == self.threads {
                            return None;
                        }
                    }
                }
                Err(_) => {
                    self.set_waiting(true);
                    self.set_quitting(false);
                    if self.num_waiting() == self.threads {
                        for _ in 0..self.threads {
                            self.tx.send(Message::Quit).unwrap();
                        }
                    } else {
                        // This is a bit weird, I know, but we want producers to catch up
                        // without burning the CPU too hard.
                        thread::sleep(Duration::from_millis(1));
                    }
                }
            }
        }
    }

    fn num_waiting(&self) -> usize {
        self.num_waiting.load(Ordering::SeqCst)
    }

    fn num_quitting(&self) -> usize {
        self.num_quitting.load(Ordering::SeqCst)
    }

    fn set_waiting(&mut self, desired: bool) {
        if desired && !self.is_waiting {
            self.is_waiting = true;
            self.num_waiting.fetch_add(1, Ordering::SeqCst);
        } else if !desired && self.is_waiting {
            self.is_waiting = false;
            self.num_waiting.fetch_sub(1, Ordering::SeqCst);
        }
    }

    fn set_quitting(&mut self, desired: bool) {
        if desired && !self.is_quitting {
            self.is_quitting = true;
            self.num_quitting.fetch_add(1, Ordering::SeqCst);
        } else if !desired && self.is_quitting {
            self.is_quitting = false;
            self.num_quitting.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

pub struct WorkerPool {
    num_workers: usize,
    schema: Arc<Schema>,
    settings: Arc<CompileSettings>,
    root_dir: PathBuf,
}

impl WorkerPool {
    pub fn new(
        num_workers: usize,
        schema: Schema,
        settings: CompileSettings,
        root_dir: PathBuf,
    ) -> WorkerPool {
        WorkerPool {
            num_workers,
            schema: Arc::new(schema),
            settings: Arc::new(settings),
            root_dir,
        }
    }

    /// Walks the root directory and compiles every `.graphql` file found,
    /// returning the diagnostics from all workers.
    pub fn work(&self) -> Vec<PrintableMessage> {
        let threads = self.num_workers;
        let (tx, rx) = channel::unbounded();
        let num_waiting = Arc::new(AtomicUsize::new(threads));
        let num_quitting = Arc::new(AtomicUsize::new(0));
        let mut handles = vec![];
        for _ in 0..threads {
            let worker = Worker {
                threads,
                num_quitting: num_quitting.clone(),
                num_waiting: num_waiting.clone(),
                is_quitting: false,
                is_waiting: true,
                tx: tx.clone(),
                rx: rx.clone(),
                schema: self.schema.clone(),
                settings: self.settings.clone(),
                root_dir: self.root_dir.clone(),
                messages: Vec::new(),
            };
            let handle = thread::spawn(|| worker.run());
            handles.push(handle);
        }
        let root = Message::Work(Work::DirEntry(self.root_dir.clone()));
        tx.send(root).unwrap();
        drop(tx);
        drop(rx);
        let mut all_messages = Vec::new();
        for handle in handles {
            let mut worker_messages = handle.join().unwrap();
            all_messages.append(&mut worker_messages);
        }
        all_messages
    }
}
