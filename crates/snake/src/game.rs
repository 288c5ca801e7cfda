//! SnakeGame - the snake engine behind the polling interface

use log::debug;

use crate::fsm::{transition, SnakeEvent, SnakeState};
use crate::model::{Direction, Point, Snake};
use crate::rules::{
    collides, initial_food_seed, level_for_score, next_food_seed, scan_free_cell,
    tick_limits_for_level, will_eat, BASE_TICK_LIMIT, FAST_TICK_LIMIT,
};
use crate::types::{GameInfo, GameKind, UserAction, CELL_FILLED, CELL_FOOD};
use brick_game_core::{speed_ms, Config, EdgeLatch, Engine, HighScore, InputLatch, ScoreStore};

pub struct SnakeGame {
    state: SnakeState,
    snake: Snake,
    food: Point,
    score: u32,
    level: u32,
    /// Polls spent waiting in DROP.
    tick: u32,
    base_limit: u32,
    fast_limit: u32,
    /// Turn requests, acceleration (held) and terminate.
    latch: InputLatch,
    /// One-shot accelerate click: the next DROP fires at once.
    accel_click: bool,
    paused: bool,
    game_over: bool,
    high_score: HighScore,
    terminate_edge: EdgeLatch,
}

impl SnakeGame {
    pub fn new(mut high_score: HighScore) -> Self {
        high_score.load_once();
        let snake = Snake::centered();
        let food = initial_food(&snake, 0);
        Self {
            state: SnakeState::Start,
            snake,
            food,
            score: 0,
            level: 1,
            tick: 0,
            base_limit: BASE_TICK_LIMIT,
            fast_limit: FAST_TICK_LIMIT,
            latch: InputLatch::new(UserAction::Action),
            accel_click: false,
            paused: false,
            game_over: false,
            high_score,
            terminate_edge: EdgeLatch::default(),
        }
    }

    pub fn with_store(store: impl ScoreStore + 'static) -> Self {
        Self::new(HighScore::new(store))
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(HighScore::from_path(config.score_file(GameKind::Snake)))
    }

    pub fn state(&self) -> SnakeState {
        self.state
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Point {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn high_score(&self) -> u32 {
        self.high_score.value()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_accelerating(&self) -> bool {
        self.latch.held_state()
    }

    /// `(base, fast)` polls per move.
    pub fn tick_limits(&self) -> (u32, u32) {
        (self.base_limit, self.fast_limit)
    }

    fn effective_tick_limit(&self) -> u32 {
        let limit = if self.latch.held_state() {
            self.fast_limit
        } else {
            self.base_limit
        };
        limit.max(1)
    }

    fn reentry(&self) -> Option<SnakeEvent> {
        match self.state {
            SnakeState::GameOver if !self.game_over => Some(SnakeEvent::Restart),
            SnakeState::Paused if !self.paused => Some(SnakeEvent::Resumed),
            _ => None,
        }
    }

    fn run_state(&mut self) -> SnakeEvent {
        match self.state {
            SnakeState::Start => self.start_session(),
            SnakeState::Input => self.read_input(),
            SnakeState::Drop => self.wait_tick(),
            SnakeState::Fix => self.move_head(),
            SnakeState::Paused => self.hold_paused(),
            SnakeState::GameOver => SnakeEvent::Idle,
        }
    }

    fn start_session(&mut self) -> SnakeEvent {
        self.high_score.load_once();
        self.latch.reset();
        self.accel_click = false;
        self.paused = false;
        self.game_over = false;
        self.score = 0;
        self.level = 1;
        self.base_limit = BASE_TICK_LIMIT;
        self.fast_limit = FAST_TICK_LIMIT;
        self.tick = 0;
        self.snake = Snake::centered();
        self.food = initial_food(&self.snake, self.score);
        debug!("snake session started, food at {:?}", self.food);
        SnakeEvent::Started
    }

    fn read_input(&mut self) -> SnakeEvent {
        if let Some(action) = self.latch.take_one() {
            self.apply_turn(action);
        }

        if self.paused {
            SnakeEvent::PauseEntered
        } else if self.game_over || self.latch.take_terminate_once() {
            self.end_game();
            SnakeEvent::Ended
        } else {
            SnakeEvent::Continue
        }
    }

    fn apply_turn(&mut self, action: UserAction) {
        let current = self.snake.direction();
        let candidate = match action {
            UserAction::Left => current.turned_left(),
            UserAction::Right => current.turned_right(),
            _ => return,
        };
        if !candidate.is_opposite(current) {
            self.snake.set_direction(candidate);
        }
    }

    fn wait_tick(&mut self) -> SnakeEvent {
        if self.accel_click {
            self.accel_click = false;
            self.tick = 0;
            return SnakeEvent::Ready;
        }
        if self.tick + 1 >= self.effective_tick_limit() {
            self.tick = 0;
            SnakeEvent::Ready
        } else {
            self.tick += 1;
            SnakeEvent::Waiting
        }
    }

    fn move_head(&mut self) -> SnakeEvent {
        let head = self.snake.head().step(self.snake.direction());
        let eating = will_eat(head, self.food);

        if collides(&self.snake, head, eating) {
            self.latch.request_terminate();
            self.latch.set_held(false);
            self.accel_click = false;
            self.end_game();
            return SnakeEvent::Collided;
        }

        self.snake.advance(head, eating);
        if eating {
            self.score += 1;
            self.high_score.observe(self.score);
            self.maybe_level_up();
            self.spawn_next_food();
        }
        SnakeEvent::Moved
    }

    fn maybe_level_up(&mut self) {
        let level = level_for_score(self.score);
        if level != self.level {
            self.level = level;
            (self.base_limit, self.fast_limit) = tick_limits_for_level(level);
            debug!("snake level {level}");
        }
    }

    fn spawn_next_food(&mut self) {
        let seed = next_food_seed(self.food, self.score);
        // A full field keeps the old food.
        if let Some(food) = scan_free_cell(seed, &self.snake) {
            self.food = food;
        }
    }

    fn hold_paused(&mut self) -> SnakeEvent {
        self.tick = 0;
        if self.latch.take_terminate_once() {
            self.paused = false;
            self.end_game();
            return SnakeEvent::Ended;
        }
        SnakeEvent::Idle
    }

    fn end_game(&mut self) {
        if !self.game_over {
            debug!(
                "snake game over: score {} length {}",
                self.score,
                self.snake.len()
            );
        }
        self.game_over = true;
    }
}

fn initial_food(snake: &Snake, score: u32) -> Point {
    let seed = initial_food_seed(snake.head(), score);
    scan_free_cell(seed, snake).unwrap_or(seed)
}

impl Engine for SnakeGame {
    fn kind(&self) -> GameKind {
        GameKind::Snake
    }

    fn submit_input(&mut self, action: UserAction, held: bool) {
        match action {
            UserAction::Left | UserAction::Right => self.latch.submit(action, held),
            UserAction::Action => {
                self.latch.set_held(held);
                if !held {
                    self.accel_click = true;
                }
            }
            UserAction::Pause => {
                if !self.game_over {
                    self.paused = !self.paused;
                }
            }
            UserAction::Terminate => self.latch.request_terminate(),
            UserAction::Start => {
                if self.game_over {
                    self.game_over = false;
                }
            }
            UserAction::Up | UserAction::Down => {}
        }
    }

    fn step(&mut self) {
        let event = match self.reentry() {
            Some(event) => event,
            None => self.run_state(),
        };
        self.state = transition(self.state, event);
    }

    fn snapshot_into(&self, out: &mut GameInfo) {
        out.clear();
        for p in self.snake.iter().filter(|p| p.in_bounds()) {
            out.field[p.y as usize][p.x as usize] = CELL_FILLED;
        }
        if self.food.in_bounds() {
            out.field[self.food.y as usize][self.food.x as usize] = CELL_FOOD;
        }
        out.score = self.score;
        out.high_score = self.high_score.value();
        out.level = self.level;
        out.speed_ms = speed_ms(self.level, self.latch.held_state());
        out.paused = self.paused;
        out.game_over = self.state == SnakeState::GameOver;
    }

    fn is_game_over(&self) -> bool {
        self.state == SnakeState::GameOver
    }

    fn take_terminate_once(&mut self) -> bool {
        let condition = self.is_game_over() || self.latch.terminate_pending();
        self.terminate_edge.read(condition)
    }
}
