/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{debug, info, warn};
use std::sync::Arc;
use std::thread::{Builder, JoinHandle};
use std::time::Duration;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::{ElevatorSettings, ServiceConfig};
use crate::dispatcher::Dispatcher;
use crate::elevator::Car;
use crate::fleet::CarRepository;
use crate::shared::{CarResponse, DispatchError};

/***************************************/
/*               Enums                 */
/***************************************/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    GetCar(u8),
    AddStop { car_id: u8, floor: i8 },
    MoveCar(u8),
    CallCar(i8),
}

pub type Reply = Result<CarResponse, DispatchError>;

/// A request and the channel its reply goes back on.
pub type Envelope = (Request, cbc::Sender<Reply>);

enum Event {
    NewRequest(Envelope),
    NoEvent,
    Terminate,
}

/***************************************/
/*             Public API              */
/***************************************/
/**
 * The operations a client can run against the fleet.
 *
 * Resolves car ids through the repository and hands calls to the dispatcher. Every
 * operation answers with the affected car's state.
 *
 * # Fields
 * - `repository`:  Fleet lookup.
 * - `dispatcher`:  Call assignment across the fleet.
 */
pub struct CarService {
    repository: Arc<dyn CarRepository>,
    dispatcher: Dispatcher,
}

impl CarService {
    pub fn new(repository: Arc<dyn CarRepository>, settings: &ElevatorSettings) -> CarService {
        let dispatcher = Dispatcher::new(
            Arc::clone(&repository),
            settings.min_floor,
            settings.max_floor,
        );

        CarService {
            repository,
            dispatcher,
        }
    }

    pub fn get_by_id(&self, car_id: u8) -> Reply {
        Ok(self.find_car(car_id)?.snapshot())
    }

    pub fn add_stop(&self, car_id: u8, floor: i8) -> Reply {
        let car = self.find_car(car_id)?;
        car.add_stop(floor)?;
        Ok(car.snapshot())
    }

    pub fn move_car(&self, car_id: u8) -> Reply {
        let car = self.find_car(car_id)?;
        car.move_next();
        Ok(car.snapshot())
    }

    pub fn call_car(&self, floor: i8) -> Reply {
        let car = self.dispatcher.call(floor)?;
        info!(
            "Call to floor {} assigned to car {} ({:?})",
            floor,
            car.id(),
            car.direction()
        );
        Ok(car.snapshot())
    }

    pub fn handle(&self, request: Request) -> Reply {
        debug!("Handling {:?}", request);

        let reply = match request {
            Request::GetCar(car_id) => self.get_by_id(car_id),
            Request::AddStop { car_id, floor } => self.add_stop(car_id, floor),
            Request::MoveCar(car_id) => self.move_car(car_id),
            Request::CallCar(floor) => self.call_car(floor),
        };

        if let Err(e) = &reply {
            warn!("{:?} failed: {}", request, e);
        }
        reply
    }

    fn find_car(&self, car_id: u8) -> Result<Arc<Car>, DispatchError> {
        self.repository
            .get_by_id(car_id)
            .ok_or(DispatchError::CarNotFound(car_id))
    }
}

/**
 * Pool of worker threads serving `CarService` requests.
 *
 * Workers share one request queue, so requests are handled concurrently and each car's
 * own lock keeps its stop queue consistent.
 *
 * # Fields
 * - `request_tx`:      Queue feeding the workers.
 * - `terminate_tx`:    Stops every worker when dropped or sent on.
 * - `workers`:         Join handles of the worker threads.
 * - `reply_timeout`:   How long a client waits for a reply.
 */
pub struct ServicePool {
    request_tx: cbc::Sender<Envelope>,
    terminate_tx: cbc::Sender<()>,
    workers: Vec<JoinHandle<()>>,
    reply_timeout: Duration,
}

impl ServicePool {
    pub fn start(
        service: CarService,
        config: &ServiceConfig,
    ) -> Result<ServicePool, DispatchError> {
        let (request_tx, request_rx) = cbc::unbounded::<Envelope>();
        let (terminate_tx, terminate_rx) = cbc::unbounded::<()>();
        let service = Arc::new(service);
        let worker_count = config.worker_threads.max(1);

        let mut workers = Vec::with_capacity(worker_count);
        for n in 0..worker_count {
            let worker = Worker {
                service: Arc::clone(&service),
                request_rx: request_rx.clone(),
                terminate_rx: terminate_rx.clone(),
            };

            let handle = Builder::new()
                .name(format!("car_service_{n}"))
                .spawn(move || worker.run())
                .map_err(|e| DispatchError::ServiceUnavailable(e.to_string()))?;
            workers.push(handle);
        }

        info!("Car service started with {} workers", worker_count);

        Ok(ServicePool {
            request_tx,
            terminate_tx,
            workers,
            reply_timeout: Duration::from_millis(config.reply_timeout),
        })
    }

    pub fn client(&self) -> ServiceClient {
        ServiceClient {
            request_tx: self.request_tx.clone(),
            reply_timeout: self.reply_timeout,
        }
    }

    pub fn shutdown(self) {
        // One message per worker; a worker exits after taking one.
        for _ in 0..self.workers.len() {
            let _ = self.terminate_tx.send(());
        }

        for worker in self.workers {
            if worker.join().is_err() {
                warn!("Car service worker panicked");
            }
        }

        info!("Car service stopped");
    }
}

/// Handle for sending requests to a running `ServicePool`.
#[derive(Clone)]
pub struct ServiceClient {
    request_tx: cbc::Sender<Envelope>,
    reply_timeout: Duration,
}

impl ServiceClient {
    pub fn get_car(&self, car_id: u8) -> Reply {
        self.send(Request::GetCar(car_id))
    }

    pub fn add_stop(&self, car_id: u8, floor: i8) -> Reply {
        self.send(Request::AddStop { car_id, floor })
    }

    pub fn move_car(&self, car_id: u8) -> Reply {
        self.send(Request::MoveCar(car_id))
    }

    pub fn call_car(&self, floor: i8) -> Reply {
        self.send(Request::CallCar(floor))
    }

    pub fn send(&self, request: Request) -> Reply {
        let (reply_tx, reply_rx) = cbc::bounded::<Reply>(1);

        self.request_tx
            .send((request, reply_tx))
            .map_err(|_| DispatchError::ServiceUnavailable("car service stopped".to_string()))?;

        match reply_rx.recv_timeout(self.reply_timeout) {
            Ok(reply) => reply,
            Err(cbc::RecvTimeoutError::Timeout) => Err(DispatchError::ServiceUnavailable(
                format!("no reply to {:?} within {:?}", request, self.reply_timeout),
            )),
            Err(cbc::RecvTimeoutError::Disconnected) => Err(DispatchError::ServiceUnavailable(
                "car service dropped the request".to_string(),
            )),
        }
    }
}

struct Worker {
    service: Arc<CarService>,
    request_rx: cbc::Receiver<Envelope>,
    terminate_rx: cbc::Receiver<()>,
}

impl Worker {
    fn run(self) {
        loop {
            match self.wait_for_event() {
                Event::NewRequest((request, reply_tx)) => {
                    let reply = self.service.handle(request);
                    if reply_tx.send(reply).is_err() {
                        debug!("Client gave up on {:?}", request);
                    }
                }
                Event::NoEvent => {}
                Event::Terminate => break,
            }
        }
    }

    fn wait_for_event(&self) -> Event {
        cbc::select! {
            recv(self.request_rx) -> envelope => {
                match envelope {
                    Ok(envelope) => Event::NewRequest(envelope),
                    Err(_) => Event::Terminate,
                }
            }

            recv(self.terminate_rx) -> _ => Event::Terminate,

            default(Duration::from_millis(100)) => Event::NoEvent,
        }
    }
}
