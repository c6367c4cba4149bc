use hailcore::calibration::{PixelPoint, ReferencePointSource};
use hailcore::prelude::{TrackError, TrackResult};
use iced::{
    mouse,
    widget::{
        canvas::{self, Canvas, Frame, Geometry, Path},
        image,
        image::Handle,
        mouse_area, stack,
    },
    Color, ContentFit, Element, Length, Point, Rectangle, Renderer, Size, Task, Theme,
};
use log::info;
use std::path::{Path as FsPath, PathBuf};
use std::sync::{Arc, Mutex};

const MARKER_RADIUS: f32 = 5.0;

/// Still frame the operator clicks on, decoded once up front.
#[derive(Debug, Clone)]
pub struct ReferenceFrame {
    width: u32,
    height: u32,
    handle: Handle,
}

impl ReferenceFrame {
    pub fn open(path: &FsPath) -> TrackResult<Self> {
        let decoded = ::image::open(path).map_err(|err| {
            TrackError::FrameUnavailable(format!("{}: {}", path.display(), err))
        })?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(TrackError::FrameUnavailable(format!(
                "{} has no pixels",
                path.display()
            )));
        }
        Ok(Self {
            width,
            height,
            handle: Handle::from_rgba(width, height, rgba.into_raw()),
        })
    }

    pub fn size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }
}

/// Opens a window on the reference frame and blocks until two clicks land or
/// the window is closed.
pub struct IcedPointPicker {
    image_path: PathBuf,
}

impl IcedPointPicker {
    pub fn new(image_path: PathBuf) -> Self {
        Self { image_path }
    }
}

impl ReferencePointSource for IcedPointPicker {
    fn obtain_two_reference_points(&mut self) -> TrackResult<(PixelPoint, PixelPoint)> {
        let frame = ReferenceFrame::open(&self.image_path)?;
        let window_size = frame.size();
        let selected = Arc::new(Mutex::new(Vec::new()));
        let boot_selected = selected.clone();

        iced::application(
            move || Picker::boot(frame.clone(), boot_selected.clone()),
            Picker::update,
            Picker::view,
        )
        .title(picker_title)
        .window_size(window_size)
        .run()
        .map_err(|err| TrackError::FrameUnavailable(format!("picker window failed: {}", err)))?;

        let points = selected
            .lock()
            .map(|points| points.clone())
            .unwrap_or_default();
        match points.as_slice() {
            [first, second, ..] => Ok((*first, *second)),
            other => Err(TrackError::InsufficientPoints(other.len())),
        }
    }
}

fn picker_title(_: &Picker) -> String {
    "Select Reference Points".into()
}

#[derive(Debug, Clone)]
enum Message {
    CursorMoved(Point),
    Pressed,
}

struct Picker {
    frame: ReferenceFrame,
    cursor: Option<Point>,
    points: Vec<PixelPoint>,
    selected: Arc<Mutex<Vec<PixelPoint>>>,
}

impl Picker {
    fn boot(frame: ReferenceFrame, selected: Arc<Mutex<Vec<PixelPoint>>>) -> (Self, Task<Message>) {
        (
            Picker {
                frame,
                cursor: None,
                points: Vec::new(),
                selected,
            },
            Task::none(),
        )
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::CursorMoved(point) => {
                state.cursor = Some(point);
                Task::none()
            }
            Message::Pressed => {
                if state.register_click() && state.points.len() == 2 {
                    iced::exit()
                } else {
                    Task::none()
                }
            }
        }
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let size = state.frame.size();
        let picture = image(state.frame.handle.clone())
            .width(Length::Fixed(size.width))
            .height(Length::Fixed(size.height))
            .content_fit(ContentFit::Fill);
        let markers = Canvas::new(Markers {
            points: state.points.clone(),
        })
        .width(Length::Fixed(size.width))
        .height(Length::Fixed(size.height));

        mouse_area(stack![picture, markers])
            .on_move(Message::CursorMoved)
            .on_press(Message::Pressed)
            .into()
    }

    /// Records the click under the cursor. Returns false when it was ignored.
    fn register_click(&mut self) -> bool {
        let Some(cursor) = self.cursor else {
            return false;
        };
        if self.points.len() >= 2 {
            return false;
        }

        let point = PixelPoint::new(cursor.x.floor() as i64, cursor.y.floor() as i64);
        info!("reference point {} selected at {}", self.points.len() + 1, point);
        self.points.push(point);
        if let Ok(mut shared) = self.selected.lock() {
            *shared = self.points.clone();
        }
        true
    }
}

#[derive(Clone)]
struct Markers {
    points: Vec<PixelPoint>,
}

impl canvas::Program<Message> for Markers {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        for point in &self.points {
            let marker = Path::new(|builder| {
                builder.circle(Point::new(point.x as f32, point.y as f32), MARKER_RADIUS)
            });
            frame.fill(&marker, Color::from_rgb(1.0, 0.0, 0.0));
        }
        vec![frame.into_geometry()]
    }
}
